use serde::Serialize;

use crate::analysis::MaskSummary;

/// Findings below this confidence are never graded high, whatever the mask
/// says.
const HIGH_GRADE_CONFIDENCE_FLOOR: f64 = 0.8;

/// Follow-up guidance attached to every report, independent of the findings.
pub const RECOMMENDATIONS: [&str; 3] = [
    "Surgical/oncology consultation",
    "Consider MRI with contrast",
    "Histopathological evaluation if clinically indicated",
];

/// The JSON record printed on success.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisReport {
    pub diagnosis: String,
    pub tumor_location: String,
    pub tumor_size: String,
    pub confidence: f64,
    pub severity: String,
    pub recommendations: [String; 3],
}

impl DiagnosisReport {
    /// Map mask findings onto the fixed diagnosis schema.
    pub fn from_summary(summary: &MaskSummary) -> Self {
        let diagnosis = if summary.tumor_present {
            "Brain Tumor Detected"
        } else {
            "No Tumor Detected"
        };
        let severity =
            if summary.tumor_present && summary.confidence >= HIGH_GRADE_CONFIDENCE_FLOOR {
                "High Grade"
            } else {
                "Low Risk"
            };

        Self {
            diagnosis: diagnosis.to_string(),
            tumor_location: summary.tumor_location.clone(),
            tumor_size: summary.tumor_size.clone(),
            confidence: (summary.confidence * 100.0 * 100.0).round() / 100.0,
            severity: severity.to_string(),
            recommendations: RECOMMENDATIONS.map(String::from),
        }
    }

    /// The single stdout line of a successful run.
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).expect("report has no unserializable fields")
    }
}
