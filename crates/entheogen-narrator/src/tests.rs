//! Integration tests for the Narrator

#[cfg(test)]
mod tests {
    use crate::{Narrative, Narrator, NarratorConfig, NarratorError};
    use entheogen_dataset::builtin;
    use entheogen_domain::GenerationError;
    use entheogen_llm::MockProvider;
    use entheogen_resolver::{render_profile, Resolver};
    use std::sync::Arc;
    use std::time::Duration;

    fn resolver() -> Resolver {
        Resolver::new(Arc::new(builtin::ceremonial().unwrap()))
    }

    fn narrator(provider: MockProvider) -> Narrator<MockProvider> {
        Narrator::new(provider, resolver(), NarratorConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_generated_explanation() {
        let provider = MockProvider::new("Both are serotonergic; avoid.");
        let narrator = narrator(provider.clone());

        let result = narrator.explain_pair("ayahuasca", "ssri").await.unwrap();
        let narrative = result.narrative.unwrap();

        assert_eq!(narrative, Narrative::Generated("Both are serotonergic; avoid.".into()));
        assert_eq!(result.check.classification.severity, 5);
        assert_eq!(provider.call_count(), 1);

        let request = provider.last_request().unwrap();
        assert_eq!(request.subject, "Ayahuasca");
        assert_eq!(request.second_subject.as_deref(), Some("SSRIs"));
    }

    #[tokio::test]
    async fn test_every_failure_falls_back_to_readout() {
        let failures = [
            GenerationError::MissingCredential,
            GenerationError::EmptyResponse,
            GenerationError::QuotaExceeded,
            GenerationError::Unavailable("connection refused".into()),
        ];

        for failure in failures {
            let narrator = narrator(MockProvider::failing(failure.clone()));
            let result = narrator.explain_pair("alcohol", "ayahuasca").await.unwrap();
            let narrative = result.narrative.unwrap();

            assert!(!narrative.is_generated());
            assert_eq!(narrative.failure(), Some(&failure));
            assert_eq!(narrative.text(), result.check.readout);
        }
    }

    #[tokio::test]
    async fn test_fallback_does_not_change_resolution() {
        let ok = narrator(MockProvider::new("text"));
        let failing = narrator(MockProvider::failing(GenerationError::QuotaExceeded));

        let a = ok.explain_pair("kambo", "alcohol").await.unwrap();
        let b = failing.explain_pair("kambo", "alcohol").await.unwrap();
        assert_eq!(a.check, b.check);
    }

    #[tokio::test]
    async fn test_blank_text_is_empty_response() {
        let narrator = narrator(MockProvider::new("   \n"));
        let result = narrator.explain_pair("lsd", "cannabis").await.unwrap();
        assert_eq!(
            result.narrative.unwrap().failure(),
            Some(&GenerationError::EmptyResponse)
        );
    }

    #[tokio::test]
    async fn test_timeout_maps_to_unavailable() {
        let provider = MockProvider::new("too late").with_delay(Duration::from_secs(5));
        let config = NarratorConfig {
            generation_timeout_secs: 1,
            ..Default::default()
        };
        let narrator = Narrator::new(provider, resolver(), config).unwrap();

        let result = narrator.explain_pair("ayahuasca", "ssri").await.unwrap();
        match result.narrative.unwrap() {
            Narrative::Fallback { reason, text } => {
                assert!(matches!(reason, GenerationError::Unavailable(_)));
                assert_eq!(text, result.check.readout);
            }
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_self_pair_skips_generator() {
        let provider = MockProvider::new("unused");
        let narrator = narrator(provider.clone());

        let result = narrator.explain_pair("psilocybin", "psilocybin").await.unwrap();
        assert!(result.narrative.is_none());
        assert!(result.check.classification.code.is_self_pair());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_self_pair_generation_when_enabled() {
        let provider = MockProvider::new("same substance");
        let config = NarratorConfig {
            generate_for_self_pairs: true,
            ..Default::default()
        };
        let narrator = Narrator::new(provider.clone(), resolver(), config).unwrap();

        let result = narrator.explain_pair("lsd", "lsd").await.unwrap();
        assert!(result.narrative.unwrap().is_generated());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_ids_still_explained() {
        let provider = MockProvider::new("no data");
        let narrator = narrator(provider.clone());

        let result = narrator.explain_pair("coffee", "tea").await.unwrap();
        assert!(result.check.evidence.is_source_gap());
        assert_eq!(provider.last_request().unwrap().subject, "coffee");
    }

    #[tokio::test]
    async fn test_single_summary_fallback_is_profile() {
        let narrator = narrator(MockProvider::failing(GenerationError::MissingCredential));
        let narrative = narrator.summarize("kambo", None).await.unwrap();

        let kambo = narrator.resolver().dataset().find_substance("kambo").unwrap();
        assert_eq!(narrative.text(), render_profile(kambo));
    }

    #[tokio::test]
    async fn test_combined_summary_fallback_is_readout() {
        let narrator = narrator(MockProvider::failing(GenerationError::QuotaExceeded));
        let narrative = narrator.summarize("ayahuasca", Some("ssri")).await.unwrap();

        let check = narrator.resolver().check("ayahuasca", "ssri").unwrap();
        assert_eq!(narrative.text(), check.readout);
    }

    #[tokio::test]
    async fn test_combined_summary_carries_pair_risk() {
        let provider = MockProvider::new("summary");
        let narrator = narrator(provider.clone());
        narrator.summarize("ayahuasca", Some("ssri")).await.unwrap();

        let check = narrator.resolver().check("ayahuasca", "ssri").unwrap();
        let request = provider.last_request().unwrap();
        assert_eq!(request.second_subject.as_deref(), Some("SSRIs"));
        assert_eq!(request.context.severity, Some(5));
        assert_eq!(request.context.confidence, Some(check.evidence.confidence));
        assert_eq!(request.context.sources.as_deref(), Some(check.evidence.sources.as_str()));
        assert!(request.prompt.contains(&check.classification.label));
    }

    #[tokio::test]
    async fn test_single_summary_has_no_pair_risk() {
        let provider = MockProvider::new("summary");
        let narrator = narrator(provider.clone());
        narrator.summarize("kambo", None).await.unwrap();

        let request = provider.last_request().unwrap();
        assert!(request.context.severity.is_none());
        assert!(request.second_subject.is_none());
    }

    #[tokio::test]
    async fn test_summary_of_unknown_substance_is_error() {
        let narrator = narrator(MockProvider::default());
        let err = narrator.summarize("coffee", None).await.unwrap_err();
        assert!(matches!(err, NarratorError::UnknownSubstance(id) if id == "coffee"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = NarratorConfig {
            generation_timeout_secs: 0,
            ..Default::default()
        };
        let result = Narrator::new(MockProvider::default(), resolver(), config);
        assert!(matches!(result, Err(NarratorError::Config(_))));
    }
}
