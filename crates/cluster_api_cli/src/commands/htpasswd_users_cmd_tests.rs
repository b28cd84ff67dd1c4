use super::*;
use clap::Parser;
use cluster_api_client::ClientConfig;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Parser, Debug)]
struct TestCli {
    #[command(subcommand)]
    command: HtpasswdUserCommands,
}

fn parse(args: &[&str]) -> HtpasswdUserCommands {
    let mut argv = vec!["cluster-api"];
    argv.extend_from_slice(args);
    TestCli::try_parse_from(argv)
        .expect("Arguments should parse")
        .command
}

fn create_test_client(mock_server: &MockServer) -> ClusterApiClient {
    ClusterApiClient::new(ClientConfig::new(mock_server.uri())).expect("Failed to create client")
}

mod argument_tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("username=alice"),
            Ok(("username".to_string(), "alice".to_string()))
        );
        assert_eq!(
            parse_filter("username=a=b"),
            Ok(("username".to_string(), "a=b".to_string()))
        );
        assert!(parse_filter("username").is_err());
        assert!(parse_filter("=alice").is_err());
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(
            parse_sort("id:desc"),
            Ok(("id".to_string(), SortOrder::Descending))
        );
        assert_eq!(
            parse_sort("username"),
            Ok(("username".to_string(), SortOrder::Ascending))
        );
        assert!(parse_sort("id:sideways").is_err());
        assert!(parse_sort(":asc").is_err());
    }

    #[test]
    fn test_list_arguments() {
        let command = parse(&[
            "list",
            "--limit",
            "10",
            "--filter",
            "cluster_id=3",
            "--filter",
            "username=alice",
            "--sort",
            "id:desc",
        ]);

        match command {
            HtpasswdUserCommands::List {
                skip,
                limit,
                filters,
                sorts,
            } => {
                assert_eq!(skip, None);
                assert_eq!(limit, Some(10));
                assert_eq!(filters.len(), 2);
                assert_eq!(sorts, vec![("id".to_string(), SortOrder::Descending)]);
            }
            other => panic!("Expected list command, got {:?}", other),
        }
    }

    #[test]
    fn test_update_requires_cluster_id() {
        let result = TestCli::try_parse_from([
            "cluster-api",
            "update",
            "--id",
            "1",
            "--username",
            "alice",
            "--password",
            "pw",
            "--htpasswd-file-id",
            "7",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_delete_requires_numeric_id() {
        assert!(TestCli::try_parse_from(["cluster-api", "delete", "abc"]).is_err());
        assert!(matches!(
            parse(&["delete", "42"]),
            HtpasswdUserCommands::Delete { id: 42 }
        ));
    }
}

mod execute_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_prints_users_without_passwords() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/htpasswd-users"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "username": "alice", "password": "$apr1$hashed", "htpasswd_file_id": 7, "cluster_id": 3}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);

        let output = execute(parse(&["list", "--limit", "1"]), &client)
            .await
            .expect("List should succeed");

        assert!(output.success);
        assert!(output.message.contains("alice"));
        assert!(!output.message.contains("apr1"));
        assert!(output.affected_clusters.is_empty());
    }

    #[tokio::test]
    async fn test_create_reports_affected_cluster() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/htpasswd-users"))
            .and(body_json(json!({
                "username": "alice",
                "password": "s3cret",
                "htpasswd_file_id": 7
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 10,
                "username": "alice",
                "htpasswd_file_id": 7,
                "cluster_id": 3
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);

        let output = execute(
            parse(&[
                "create",
                "--username",
                "alice",
                "--password",
                "s3cret",
                "--htpasswd-file-id",
                "7",
            ]),
            &client,
        )
        .await
        .expect("Create should succeed");

        assert!(output.success);
        assert!(output.message.contains("\"id\": 10"));
        assert_eq!(output.affected_clusters, vec![3]);
    }

    #[tokio::test]
    async fn test_create_with_empty_password_is_rejected_locally() {
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server);

        let result = execute(
            parse(&[
                "create",
                "--username",
                "alice",
                "--password",
                "",
                "--htpasswd-file-id",
                "7",
            ]),
            &client,
        )
        .await;

        assert!(matches!(
            result,
            Err(Error::Client(cluster_api_client::Error::Validation { .. }))
        ));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_failure_describes_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/htpasswd-users/5"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Not Found"})),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);

        let output = execute(parse(&["get", "5"]), &client).await.unwrap();

        assert!(!output.success);
        assert_eq!(
            output.message,
            "Request failed with status 404 Not Found: Not Found"
        );
    }

    #[tokio::test]
    async fn test_delete_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/htpasswd-users/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5,
                "username": "bob",
                "htpasswd_file_id": 7,
                "cluster_id": 9
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/htpasswd-users/5"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);

        let output = execute(parse(&["delete", "5"]), &client).await.unwrap();

        assert!(output.success);
        assert_eq!(output.message, "Deleted htpasswd user 5");
        assert_eq!(output.affected_clusters, vec![9]);
    }

    #[tokio::test]
    async fn test_run_with_missing_config() {
        let result = run(
            parse(&["get", "1"]),
            Some("/nonexistent/dir/cluster-api.toml"),
        )
        .await;

        assert!(matches!(result, Err(Error::Config(_))));
    }
}
