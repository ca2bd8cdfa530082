use crate::infra::LexiconClassifier;
use chrono::{Local, Timelike};
use civic_triage::analysis::{
    Category, ClassifiedComplaint, Classifier, SituationReport, TriageConfig, TriageService,
    UNKNOWN_ZONE,
};
use civic_triage::error::AppError;
use clap::Args;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reporting hour (0-23) driving the time-of-day phrasing. Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_hour)]
    pub(crate) hour: Option<u32>,
    /// Restrict the situation report to one zone
    #[arg(long)]
    pub(crate) zone: Option<String>,
    /// Print the full scoring breakdown for every complaint
    #[arg(long)]
    pub(crate) show_breakdown: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// JSON batch document holding `complaints` and an optional `previous` period
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Restrict the situation report to one zone
    #[arg(long)]
    pub(crate) zone: Option<String>,
    /// Reporting hour (0-23) driving the time-of-day phrasing. Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_hour)]
    pub(crate) hour: Option<u32>,
    /// Print the full scoring breakdown for every complaint
    #[arg(long)]
    pub(crate) show_breakdown: bool,
}

/// On-disk shape consumed by the `report` command: the current batch plus an
/// optional previous period for trend comparison.
#[derive(Debug, Deserialize)]
pub(crate) struct ComplaintBatchFile {
    pub(crate) complaints: Vec<ClassifiedComplaint>,
    #[serde(default)]
    pub(crate) previous: Option<Vec<ClassifiedComplaint>>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        input,
        zone,
        hour,
        show_breakdown,
    } = args;

    let raw = std::fs::read_to_string(&input)?;
    let batch: ComplaintBatchFile = serde_json::from_str(&raw)?;
    let hour = hour.unwrap_or_else(current_hour);

    let service = triage_service();
    let report = service.situation_report(
        &batch.complaints,
        zone.as_deref(),
        batch.previous.as_deref(),
        hour,
    );

    println!("Complaint batch: {}", input.display());
    render_situation_report(&report, zone.as_deref());
    if show_breakdown {
        render_breakdowns(&service, &batch.complaints);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        hour,
        zone,
        show_breakdown,
    } = args;

    let hour = hour.unwrap_or_else(current_hour);

    println!("Complaint triage demo");

    let classifier = LexiconClassifier::standard();
    let service = triage_service();
    let current = classify_demo_intake(&classifier)?;

    println!("\nClassified intake");
    for record in &current {
        let outcome = service.score(record);
        println!(
            "- [{}] {} (priorité {}, zone {}) {}",
            outcome.tier.label(),
            record.category,
            outcome.breakdown.total,
            record.zone.as_deref().unwrap_or(UNKNOWN_ZONE),
            record.description
        );
    }
    if show_breakdown {
        render_breakdowns(&service, &current);
    }

    let previous = demo_previous_period();
    let report = service.situation_report(&current, zone.as_deref(), Some(&previous), hour);
    render_situation_report(&report, zone.as_deref());

    Ok(())
}

fn triage_service() -> TriageService<LexiconClassifier> {
    TriageService::new(
        Arc::new(LexiconClassifier::standard()),
        TriageConfig::standard(),
    )
}

fn current_hour() -> u32 {
    Local::now().hour()
}

fn classify_demo_intake(
    classifier: &LexiconClassifier,
) -> Result<Vec<ClassifiedComplaint>, AppError> {
    demo_intake()
        .into_iter()
        .map(|(description, localisation, zone)| {
            let scores = classifier.classify(description)?;
            Ok(ClassifiedComplaint::from_scores(description, scores)?
                .with_localisation(localisation)
                .with_zone(zone))
        })
        .collect()
}

/// Canned intake covering every cascade branch: an escalated assault cluster,
/// a medical-waste dump, a sensitive location, and an administrative bribe.
fn demo_intake() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        (
            "Attaque au couteau devant la gare, un passant blessé",
            "École Ibn Sina",
            "Agdal",
        ),
        (
            "Bagarre et menaces entre groupes à la sortie du stade",
            "Avenue Mohammed V",
            "Agdal",
        ),
        (
            "Agression d'un commerçant, l'agresseur était armé",
            "Marché central",
            "Centre-Ville",
        ),
        (
            "Dépôt sauvage d'ordures et de déchets médicaux près du canal",
            "Quartier industriel",
            "Sidi Moumen",
        ),
        (
            "Poubelles renversées, odeurs fortes depuis trois jours",
            "Rue des Écoles",
            "Sidi Moumen",
        ),
        (
            "Agent qui réclame un pot-de-vin pour délivrer un permis",
            "Annexe administrative",
            "Centre-Ville",
        ),
    ]
}

fn demo_previous_period() -> Vec<ClassifiedComplaint> {
    vec![
        ClassifiedComplaint::new("Vitrine cassée pendant la nuit", Category::new("AGRESSION"))
            .with_zone("Agdal"),
        ClassifiedComplaint::new(
            "Sacs d'ordures abandonnés sur le trottoir",
            Category::new("DECHETS"),
        )
        .with_zone("Sidi Moumen"),
    ]
}

fn render_situation_report(report: &SituationReport, zone: Option<&str>) {
    println!("\nSituation report");
    match zone {
        Some(zone) => println!("Scope: zone {} ({} plaintes)", zone, report.complaint_count),
        None => println!("Scope: all zones ({} plaintes)", report.complaint_count),
    }
    println!("Severity: {}", report.severity_level.label());
    println!("Summary: {}", report.natural_language_summary);

    if let Some(trend) = &report.trend {
        println!("\nTrend vs previous period");
        println!(
            "- {} -> {} signalements ({:+.1}%, {})",
            trend.previous_count,
            trend.current_count,
            trend.percentage_change,
            trend.direction.label()
        );
        println!("- {}", trend.message());
        if trend.is_anomaly {
            println!("- Anomaly threshold crossed");
        }
    }

    println!("\nRecommended actions");
    for recommendation in &report.recommendations {
        println!("- {}", recommendation);
    }
}

fn render_breakdowns<C: Classifier>(
    service: &TriageService<C>,
    complaints: &[ClassifiedComplaint],
) {
    println!("\nScoring breakdown");
    for complaint in complaints {
        let outcome = service.score(complaint);
        let breakdown = outcome.breakdown;
        println!(
            "- [{}] {} | base {} | mots urgents {} | lieu sensible {} | règles catégorie {} | total {}",
            outcome.tier.label(),
            complaint.category,
            breakdown.base,
            breakdown.urgent_keywords,
            breakdown.location_bonus,
            breakdown.category_specific,
            breakdown.total
        );
    }
}
