//! Document-level recognition confidence from inline `(conf=…)` annotations.

use super::patterns::CONFIDENCE_ANNOTATION;

/// Every parseable `(conf=<float>)` annotation in the text, in order.
///
/// `(low_conf=…)` annotations are not samples.
pub fn confidence_samples(text: &str) -> Vec<f64> {
    CONFIDENCE_ANNOTATION
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse::<f64>().ok())
        .collect()
}

/// Arithmetic mean of the confidence samples, or `None` without any.
pub fn average_confidence(text: &str) -> Option<f64> {
    let samples = confidence_samples(text);
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{TranscriptLine, TranscriptWriter};

    #[test]
    fn test_average_of_three() {
        let text = "a  (conf=0.90)\nb  (conf=0.80)\nc  (conf=1.00)";
        let avg = average_confidence(text).unwrap();
        assert!((avg - 0.90).abs() < 1e-9, "{avg}");
    }

    #[test]
    fn test_no_annotations() {
        assert_eq!(average_confidence("Договор № 1\nбез оценок"), None);
        assert_eq!(average_confidence(""), None);
    }

    #[test]
    fn test_low_conf_is_not_a_sample() {
        let text = "a  (conf=0.50)\nb  (low_conf=0.10)";
        assert_eq!(confidence_samples(text), vec![0.5]);
    }

    #[test]
    fn test_malformed_annotation_is_skipped() {
        let text = "a  (conf=0.9.1)\nb  (conf=.)\nc  (conf=0.70)";
        assert_eq!(confidence_samples(text), vec![0.7]);
    }

    #[test]
    fn test_reads_writer_output() {
        let mut writer = TranscriptWriter::new().with_conf_threshold(Some(0.6));
        writer.push_page(
            1,
            &[
                TranscriptLine::new("x", Some(0.8)),
                TranscriptLine::new("y", Some(0.4)),
                TranscriptLine::new("z", Some(0.6)),
                TranscriptLine::new("w", None),
            ],
        );
        let avg = average_confidence(&writer.finish()).unwrap();
        assert!((avg - 0.7).abs() < 1e-9, "{avg}");
    }
}
