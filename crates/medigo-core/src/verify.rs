//! Closed-world packaging verification.
//!
//! A detected brand name is authentic when the catalog knows a medication whose name
//! overlaps it. No network lookup is involved beyond the optional packaging read.

use std::sync::Arc;

use tracing::{info, warn};

use crate::ai::{PackagingIdentification, PackagingIdentifier, UNREADABLE_SENTINEL};
use crate::catalog::CatalogStore;
use crate::models::{MedicationRecord, VerificationReport, VerificationVerdict};

/// Verifies detected packaging names against the catalog.
pub struct VerificationEngine {
    catalog: Arc<CatalogStore>,
    identifier: Option<Arc<dyn PackagingIdentifier>>,
}

impl VerificationEngine {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self {
            catalog,
            identifier: None,
        }
    }

    pub fn with_identifier(mut self, identifier: Arc<dyn PackagingIdentifier>) -> Self {
        self.identifier = Some(identifier);
        self
    }

    /// Verdict for a detected name.
    pub fn verify(&self, detected_name: &str) -> VerificationVerdict {
        match self.find_known(detected_name) {
            Some(_) => VerificationVerdict::Authentic,
            None => VerificationVerdict::Suspect,
        }
    }

    /// Verdict plus the classifier output and the matched medication.
    pub fn report(&self, identification: &PackagingIdentification) -> VerificationReport {
        let matched = self.find_known(&identification.detected_name);
        let verdict = if matched.is_some() {
            VerificationVerdict::Authentic
        } else {
            VerificationVerdict::Suspect
        };

        info!(
            detected = %identification.detected_name,
            confidence = identification.confidence.as_str(),
            ?verdict,
            "packaging verified"
        );

        VerificationReport {
            detected_name: identification.detected_name.clone(),
            confidence: identification.confidence.as_str().to_string(),
            verdict,
            matched_medication_id: matched.map(|m| m.id.clone()),
        }
    }

    /// Read the packaging photo and verify what it says.
    ///
    /// Classifier failure or absence is reported as the unreadable sentinel, which is suspect.
    pub fn verify_image(&self, image: &[u8]) -> VerificationReport {
        let identification = match &self.identifier {
            Some(identifier) => identifier.identify(image).unwrap_or_else(|e| {
                warn!(error = %e, "packaging identification failed");
                PackagingIdentification::unreadable()
            }),
            None => PackagingIdentification::unreadable(),
        };

        self.report(&identification)
    }

    fn find_known(&self, detected_name: &str) -> Option<&MedicationRecord> {
        let detected = detected_name.trim();
        if detected.is_empty() || detected == UNREADABLE_SENTINEL {
            return None;
        }

        let detected_lower = detected.to_lowercase();
        self.catalog.medications().iter().find(|m| {
            let name_lower = m.name.to_lowercase();
            name_lower.contains(&detected_lower) || detected_lower.contains(&name_lower)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AiError, AiResult, ConfidenceLabel};
    use crate::catalog::seed::seed_medications;

    fn engine() -> VerificationEngine {
        let catalog = CatalogStore::new(seed_medications(), vec![]).unwrap();
        VerificationEngine::new(Arc::new(catalog))
    }

    struct FixedIdentifier(&'static str);

    impl PackagingIdentifier for FixedIdentifier {
        fn identify(&self, _image: &[u8]) -> AiResult<PackagingIdentification> {
            Ok(PackagingIdentification {
                detected_name: self.0.to_string(),
                confidence: ConfidenceLabel::High,
            })
        }
    }

    struct BrokenIdentifier;

    impl PackagingIdentifier for BrokenIdentifier {
        fn identify(&self, _image: &[u8]) -> AiResult<PackagingIdentification> {
            Err(AiError::Status {
                status: 503,
                body: "overloaded".into(),
            })
        }
    }

    #[test]
    fn test_known_brand_is_authentic() {
        assert_eq!(engine().verify("Coartem"), VerificationVerdict::Authentic);
        assert_eq!(engine().verify("doliprane"), VerificationVerdict::Authentic);
    }

    #[test]
    fn test_containment_either_way() {
        // detected name longer than the catalog name
        assert_eq!(engine().verify("Ventolin Evohaler 100mcg"), VerificationVerdict::Authentic);
        // detected name shorter than the catalog name
        assert_eq!(engine().verify("Zithro"), VerificationVerdict::Authentic);
    }

    #[test]
    fn test_unknown_brand_is_suspect() {
        assert_eq!(engine().verify("XYZNOTADRUG"), VerificationVerdict::Suspect);
    }

    #[test]
    fn test_sentinel_and_blank_are_suspect() {
        assert_eq!(engine().verify("Unknown"), VerificationVerdict::Suspect);
        assert_eq!(engine().verify(""), VerificationVerdict::Suspect);
        assert_eq!(engine().verify("   "), VerificationVerdict::Suspect);
    }

    #[test]
    fn test_generic_name_alone_is_suspect() {
        assert_eq!(engine().verify("Salbutamol"), VerificationVerdict::Suspect);
    }

    #[test]
    fn test_report_carries_match() {
        let report = engine().report(&PackagingIdentification {
            detected_name: "Lantus".into(),
            confidence: ConfidenceLabel::High,
        });
        assert_eq!(report.verdict, VerificationVerdict::Authentic);
        assert_eq!(report.matched_medication_id.as_deref(), Some("m4"));
        assert_eq!(report.confidence, "HIGH");
    }

    #[test]
    fn test_verify_image_with_identifier() {
        let engine = engine().with_identifier(Arc::new(FixedIdentifier("Advil")));
        let report = engine.verify_image(b"jpeg");
        assert_eq!(report.verdict, VerificationVerdict::Authentic);
        assert_eq!(report.detected_name, "Advil");
    }

    #[test]
    fn test_verify_image_failure_is_suspect() {
        let engine = engine().with_identifier(Arc::new(BrokenIdentifier));
        let report = engine.verify_image(b"jpeg");
        assert_eq!(report.detected_name, UNREADABLE_SENTINEL);
        assert_eq!(report.confidence, "LOW");
        assert_eq!(report.verdict, VerificationVerdict::Suspect);
        assert!(report.matched_medication_id.is_none());
    }

    #[test]
    fn test_verify_image_without_identifier_is_suspect() {
        assert_eq!(engine().verify_image(b"jpeg").verdict, VerificationVerdict::Suspect);
    }
}
