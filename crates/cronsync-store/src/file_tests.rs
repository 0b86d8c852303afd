
    use super::*;
    use cronsync_protocols::JobStatus;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileJobStore::new(temp_dir.path()).await.unwrap();

        let def = JobDefinition::new("1", "0/5 * * * * ?").with_title("Orders latency");
        store.save(&def).await.unwrap();

        let loaded = store.load("1").await.unwrap();
        assert_eq!(loaded, Some(def));
        assert!(store.load("2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_lists_in_file_name_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileJobStore::new(temp_dir.path()).await.unwrap();

        for id in ["c", "a", "b"] {
            store.save(&JobDefinition::new(id, "0 * * * * *")).await.unwrap();
        }

        let ids: Vec<String> = store
            .list_job_definitions()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_missing_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileJobStore::open(temp_dir.path().join("nowhere"));
        assert!(store.list_job_definitions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_files_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileJobStore::new(temp_dir.path()).await.unwrap();
        store.save(&JobDefinition::new("1", "0 * * * * *")).await.unwrap();

        std::fs::write(store.jobs_dir().join("broken.json"), "{ not json").unwrap();
        std::fs::write(store.jobs_dir().join("notes.txt"), "ignored").unwrap();

        let all = store.list_job_definitions().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "1");
    }

    #[tokio::test]
    async fn test_duplicate_ids_keep_first_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileJobStore::new(temp_dir.path()).await.unwrap();
        std::fs::write(
            store.jobs_dir().join("a.json"),
            r#"{"id": "1", "cron_expression": "0/5 * * * * ?"}"#,
        )
        .unwrap();
        std::fs::write(
            store.jobs_dir().join("b.json"),
            r#"{"id": "1", "cron_expression": "0 0 * * * ?"}"#,
        )
        .unwrap();
        store.save(&JobDefinition::new("2", "0 * * * * *")).await.unwrap();

        let all = store.list_job_definitions().await.unwrap();
        let ids: Vec<&str> = all.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        let first = all.iter().find(|d| d.id == "1").unwrap();
        assert_eq!(first.cron_expression, "0/5 * * * * ?");
    }

    #[tokio::test]
    async fn test_reads_numeric_status() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileJobStore::new(temp_dir.path()).await.unwrap();
        std::fs::write(
            store.jobs_dir().join("5.json"),
            r#"{"id": "5", "cron_expression": "0 0 * * * ?", "status": 0}"#,
        )
        .unwrap();

        let all = store.list_job_definitions().await.unwrap();
        assert_eq!(all[0].status, JobStatus::Disabled);
    }

    #[tokio::test]
    async fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileJobStore::new(temp_dir.path()).await.unwrap();
        store.save(&JobDefinition::new("1", "0 * * * * *")).await.unwrap();

        assert!(store.remove("1").await.unwrap());
        assert!(!store.remove("1").await.unwrap());
        assert!(store.list_job_definitions().await.unwrap().is_empty());
    }

    #[test]
    fn test_sanitize_id() {
        assert_eq!(FileJobStore::sanitize_id("simple-job"), "simple-job");
        assert_eq!(FileJobStore::sanitize_id("job/with/slashes"), "job_with_slashes");
        assert_eq!(FileJobStore::sanitize_id("job:with:colons"), "job_with_colons");
    }
