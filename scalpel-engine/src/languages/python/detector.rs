//! Python detection heuristic.

use crate::engine::traits::LanguageDetector;
use crate::model::language::LanguageKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// Weighted indicator patterns; confidence is the matched weight sum,
/// capped at 1.
static INDICATORS: Lazy<Vec<(Regex, f32)>> = Lazy::new(|| {
    [
        (r"(?m)^[ \t]*def[ \t]+\w+[ \t]*\(", 0.30),
        (r"(?m)^[ \t]*class[ \t]+\w+[^;{]*:[ \t]*$", 0.25),
        (r"(?m)^[ \t]*(?:from[ \t]+[\w.]+[ \t]+)?import[ \t]+\w", 0.20),
        (r"\bself\b", 0.15),
        (r"(?m)^[ \t]*@\w+", 0.10),
        (r"(?m):[ \t]*$", 0.10),
    ]
    .into_iter()
    .filter_map(|(p, w)| Regex::new(p).ok().map(|r| (r, w)))
    .collect()
});

/// Patterns that are strong evidence against Python.
static COUNTER_INDICATORS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"(?m)^[ \t]*(?:const|let|var)[ \t]+\w+", r";[ \t]*$", r"=>"]
        .into_iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

pub struct PythonDetector;

impl LanguageDetector for PythonDetector {
    fn language(&self) -> LanguageKind {
        LanguageKind::Python
    }

    fn confidence(&self, code: &str) -> f32 {
        if code.trim().is_empty() {
            return 0.0;
        }
        let mut score: f32 = INDICATORS
            .iter()
            .filter(|(re, _)| re.is_match(code))
            .map(|(_, w)| w)
            .sum();
        for re in COUNTER_INDICATORS.iter() {
            if re.is_match(code) {
                score -= 0.15;
            }
        }
        score.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_code_scores_high() {
        let d = PythonDetector;
        let code = "import os\n\nclass A:\n    def run(self):\n        return 1\n";
        assert!(d.confidence(code) > 0.5);
    }

    #[test]
    fn typescript_code_scores_low() {
        let d = PythonDetector;
        let code = "const x: number = 1;\nexport class K {\n  m() { return x; }\n}\n";
        assert!(d.confidence(code) < 0.3);
    }
}
