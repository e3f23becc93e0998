//! TypeScript detection heuristic.

use crate::engine::traits::LanguageDetector;
use crate::model::language::LanguageKind;
use once_cell::sync::Lazy;
use regex::Regex;

static INDICATORS: Lazy<Vec<(Regex, f32)>> = Lazy::new(|| {
    [
        (
            r"(?m)^[ \t]*(?:export[ \t]+)?(?:abstract[ \t]+)?(?:class|interface|enum|namespace)[ \t]+\w+",
            0.30,
        ),
        (r#"(?m)^[ \t]*import[ \t]+.*from[ \t]+['"]"#, 0.25),
        (r"(?m)^[ \t]*(?:const|let|var)[ \t]+[\w$]+", 0.20),
        (r"=>", 0.15),
        (r"(?m)^[ \t]*(?:export|declare)[ \t]+", 0.15),
        (r":[ \t]*[\w$]+(?:\[\])?[ \t]*[=;,)]", 0.10),
        (r";[ \t]*$", 0.05),
    ]
    .into_iter()
    .filter_map(|(p, w)| Regex::new(p).ok().map(|r| (r, w)))
    .collect()
});

static COUNTER_INDICATORS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?m)^[ \t]*def[ \t]+\w+[ \t]*\(",
        r"\bself\b",
        r"(?m)^[ \t]*(?:from[ \t]+[\w.]+[ \t]+)?import[ \t]+\w+[ \t]*$",
    ]
    .into_iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

pub struct TypeScriptDetector;

impl LanguageDetector for TypeScriptDetector {
    fn language(&self) -> LanguageKind {
        LanguageKind::TypeScript
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
    fn typescript_code_scores_high() {
        let d = TypeScriptDetector;
        let code = "import { x } from './x';\n\nexport class K {\n  m(): number { return 1; }\n}\n";
        assert!(d.confidence(code) > 0.5);
    }

    #[test]
    fn python_code_scores_low() {
        let d = TypeScriptDetector;
        let code = "import os\n\nclass A:\n    def run(self):\n        return 1\n";
        assert!(d.confidence(code) < 0.3);
    }
}
