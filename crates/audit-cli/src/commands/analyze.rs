//! `analyze` 명령: 진입 셋업 종합 분석 보고서.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

use audit_analysis::{evaluate, ConsistencyReport};
use audit_core::TradeAnalysis;

use crate::input::SetupFile;

/// `analyze` 명령 설정.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    /// 셋업 입력 파일 경로 (TOML)
    pub input: PathBuf,
    /// JSON으로 출력할지 여부
    pub json: bool,
}

/// 셋업 파일을 평가하고 보고서를 출력합니다.
pub fn run_analyze(config: AnalyzeConfig) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&config.input)
        .with_context(|| format!("입력 파일을 읽을 수 없습니다: {}", config.input.display()))?;
    let file = SetupFile::from_toml(&text).context("입력 파일 파싱 실패")?;
    let analysis = file.into_analysis().context("셋업 레코드 구성 실패")?;

    info!(coin = %analysis.coin_type, "진입 셋업 분석 시작");
    let report = evaluate(&analysis);

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&analysis, &report));
    }
    Ok(())
}

/// 종합 분석 보고서를 렌더링합니다.
pub fn render_report(analysis: &TradeAnalysis, report: &ConsistencyReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "==============================================");
    let _ = writeln!(out, "========== 진입 논리 종합 분석 보고서 ==========");
    let _ = writeln!(out, "==============================================");

    let _ = writeln!(out, "\n【1. 진입 기본 파라미터】");
    let _ = writeln!(out, "거래 종목: {}", analysis.coin_type);
    let _ = writeln!(out, "진입 방향: {}", analysis.open_dir);
    let _ = writeln!(out, "레버리지: {}x", analysis.leverage);
    let _ = writeln!(out, "목표 진입가: {}", analysis.open_price);
    let _ = writeln!(out, "강제청산가: {}", analysis.liquid_price);
    let _ = writeln!(out, "손절가: {}", analysis.stop_loss);
    let _ = writeln!(out, "기초 손절률: {:.2}%", analysis.stop_loss_rate);
    let _ = writeln!(out, "레버리지 손절 위험률: {:.2}%", analysis.lever_stop_loss_risk);

    let _ = writeln!(out, "\n【2. 핵심 기술적 분석】");
    let _ = writeln!(
        out,
        "다우 이론 추세: 장기={}, 중기={}, 단기={}",
        analysis.long_trend, analysis.mid_trend, analysis.short_trend
    );
    let _ = writeln!(
        out,
        "단기 추세선 돌파 횟수: {}회 (많을수록 추세 약화)",
        analysis.short_trend_line_break_times
    );
    let _ = writeln!(
        out,
        "RSI 지표: {} (지속 {}{})",
        analysis.rsi_level, analysis.rsi_duration, analysis.rsi_unit
    );
    if analysis.has_no_pattern() {
        let _ = writeln!(out, "가격 형태: 없음");
    } else {
        let items: Vec<String> = analysis
            .price_patterns
            .iter()
            .map(|p| {
                if p.kind.is_triangle() {
                    format!("{} 「{}」({})", p.span, p.kind, p.breakout)
                } else {
                    format!("{} 「{}」", p.span, p.kind)
                }
            })
            .collect();
        let _ = writeln!(out, "가격 형태: {}", items.join(", "));
    }

    let _ = writeln!(out, "\n【3. 다중 타임프레임 EMA 분석】");
    for ema in &analysis.ema_list {
        let _ = writeln!(
            out,
            "{} {}기간 EMA: 추세={}, 전환={}",
            ema.timeframe,
            ema.period,
            ema.trend,
            if ema.is_turning { "예" } else { "아니오" }
        );
    }
    let _ = writeln!(out, "EMA 신호 일관성 점수: {}/100", report.ema_score);

    let _ = writeln!(out, "\n【4. 다중 타임프레임 KST 분석】");
    for kst in &analysis.kst_list {
        let periods: Vec<String> = kst.periods.iter().map(|p| p.to_string()).collect();
        let _ = writeln!(
            out,
            "{} KST (기간: {}): {}",
            kst.timeframe,
            periods.join(","),
            kst.cross_state
        );
    }
    let _ = writeln!(out, "KST 신호 일관성 점수: {}/100", report.kst_score);

    let _ = writeln!(out, "\n【5. 리스크 관리 분석】");
    let _ = writeln!(
        out,
        "기초 손절률 합리성 점수: {}/10 (적정 구간 3%~8%)",
        report.base_stop_loss_score
    );
    let _ = writeln!(
        out,
        "레버리지 손절 위험 점수: {}/10 (40% 이하 만점, 40~60% 5점, 60% 초과 0점)",
        report.lever_stop_loss_score
    );
    if report.high_lever_risk {
        let _ = writeln!(
            out,
            "[긴급] 레버리지 손절 위험률이 60%를 초과했습니다. 레버리지나 손절가 조정을 권고합니다"
        );
    }
    let _ = writeln!(
        out,
        "진입 방향·추세 매칭 점수: {}/20 (단기 돌파 횟수 감점 반영)",
        report.dir_trend_match_score
    );

    let _ = writeln!(out, "\n【6. 신호 일관성 종합 평가】");
    let _ = writeln!(out, "종합 일관성 점수: {}/100 ({})", report.total_score, report.band);
    let _ = writeln!(out, "평가: {}", report.band.description());

    let _ = writeln!(out, "\n【7. 지표 모순점 식별】");
    if report.contradictions.is_empty() {
        let _ = writeln!(out, "뚜렷한 지표 모순점이 식별되지 않았습니다");
    } else {
        for (i, finding) in report.contradictions.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, finding);
        }
    }

    let _ = writeln!(out, "\n==============================================");
    out
}
