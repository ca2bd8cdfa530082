use civic_triage::analysis::{Category, CategoryScores, Classifier, ClassifierError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

struct CategoryCues {
    category: &'static str,
    cues: &'static [&'static str],
}

/// Cue vocabulary voting for each canonical category. Cues are lower-case
/// and matched as substrings of the lower-cased complaint text.
const LEXICON: &[CategoryCues] = &[
    CategoryCues {
        category: "AGRESSION",
        cues: &["agression", "attaque", "bagarre", "menace", "frappé"],
    },
    CategoryCues {
        category: "HARCELEMENT",
        cues: &["harcèlement", "harcelé", "harcèle", "intimidation"],
    },
    CategoryCues {
        category: "VOL",
        cues: &["volé", "cambriolage", "braquage", "pickpocket"],
    },
    CategoryCues {
        category: "DECHETS",
        cues: &["ordures", "déchets", "poubelles", "décharge"],
    },
    CategoryCues {
        category: "POLLUTION",
        cues: &["pollution", "fumées", "odeurs", "eaux usées"],
    },
    CategoryCues {
        category: "CORRUPTION",
        cues: &["corruption", "pot-de-vin", "soudoyer", "détournement"],
    },
    CategoryCues {
        category: "VOIRIE",
        cues: &["nid-de-poule", "chaussée", "trottoir", "lampadaire"],
    },
];

const CONFIDENCE_PER_CUE: f64 = 0.3;
const CONFIDENCE_CAP: f64 = 0.95;
const FALLBACK_CONFIDENCE: f64 = 0.1;

/// Deterministic in-process classifier backing the service.
///
/// Each distinct cue hit raises the category's confidence by a fixed step,
/// so any recognized word outranks the AUTRES floor and repeated cues make
/// the vote more confident without ever reaching certainty.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LexiconClassifier;

impl LexiconClassifier {
    pub(crate) fn standard() -> Self {
        Self
    }
}

impl Classifier for LexiconClassifier {
    fn classify(&self, description: &str) -> Result<CategoryScores, ClassifierError> {
        let text = description.to_lowercase();
        let mut scores = CategoryScores::new();

        for entry in LEXICON {
            let hits = entry.cues.iter().filter(|cue| text.contains(*cue)).count();
            if hits > 0 {
                let confidence = (hits as f64 * CONFIDENCE_PER_CUE).min(CONFIDENCE_CAP);
                scores.insert(Category::new(entry.category), confidence);
            }
        }

        scores.insert(Category::autres(), FALLBACK_CONFIDENCE);
        Ok(scores)
    }
}

pub(crate) fn parse_hour(raw: &str) -> Result<u32, String> {
    let value = raw
        .trim()
        .parse::<u32>()
        .map_err(|err| format!("failed to parse '{raw}' as an hour ({err})"))?;
    if value > 23 {
        return Err(format!("hour '{value}' is out of range (0-23)"));
    }
    Ok(value)
}
