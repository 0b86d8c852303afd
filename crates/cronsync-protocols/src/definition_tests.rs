
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_definition_new() {
        let def = JobDefinition::new("1", "0/5 * * * * ?");
        assert_eq!(def.id, "1");
        assert_eq!(def.cron_expression, "0/5 * * * * ?");
        assert!(def.is_enabled());
        assert!(def.attributes.is_empty());
    }

    #[test]
    fn test_equality_covers_attributes() {
        let a = JobDefinition::new("1", "0 * * * * *").with_attribute("threshold", json!(500));
        let b = JobDefinition::new("1", "0 * * * * *").with_attribute("threshold", json!(500));
        let c = JobDefinition::new("1", "0 * * * * *").with_attribute("threshold", json!(501));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_equality_ignores_attribute_insertion_order() {
        let a = JobDefinition::new("1", "0 * * * * *")
            .with_attribute("a", json!(1))
            .with_attribute("b", json!(2));
        let b = JobDefinition::new("1", "0 * * * * *")
            .with_attribute("b", json!(2))
            .with_attribute("a", json!(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_covers_status_and_notify() {
        let base = JobDefinition::new("1", "0 * * * * *");
        assert_ne!(base, base.clone().with_status(JobStatus::Disabled));
        let notify = NotifyTargets {
            emails: vec!["ops@example.com".to_string()],
            ..Default::default()
        };
        assert_ne!(base, base.clone().with_notify(notify));
    }

    #[test]
    fn test_status_accepts_numeric_codes() {
        let def: JobDefinition = serde_json::from_value(json!({
            "id": "7",
            "cron_expression": "0 0 * * * ?",
            "status": 0
        }))
        .unwrap();
        assert_eq!(def.status, JobStatus::Disabled);

        let def: JobDefinition = serde_json::from_value(json!({
            "id": "7",
            "cron_expression": "0 0 * * * ?",
            "status": 1
        }))
        .unwrap();
        assert_eq!(def.status, JobStatus::Enabled);
    }

    #[test]
    fn test_status_accepts_names() {
        let def: JobDefinition = serde_json::from_value(json!({
            "id": "7",
            "cron_expression": "0 0 * * * ?",
            "status": "Disabled"
        }))
        .unwrap();
        assert_eq!(def.status, JobStatus::Disabled);
    }

    #[test]
    fn test_status_rejects_unknown_code() {
        let result = serde_json::from_value::<JobDefinition>(json!({
            "id": "7",
            "cron_expression": "0 0 * * * ?",
            "status": 3
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let value = serde_json::to_value(JobStatus::Enabled).unwrap();
        assert_eq!(value, json!("enabled"));
        assert_eq!(JobStatus::Disabled.to_string(), "disabled");
    }

    #[test]
    fn test_minimal_definition_defaults() {
        let def: JobDefinition = serde_json::from_value(json!({
            "id": "9",
            "cron_expression": "0 0 * * * ?"
        }))
        .unwrap();
        assert!(def.is_enabled());
        assert_eq!(def.status, JobStatus::default());
        assert_eq!(JobStatus::default(), JobStatus::Enabled);
        assert!(def.title.is_empty());
        assert!(def.notify.emails.is_empty());
    }
