use ec2_inventory::{
    Credentials, DescribeRequest, Ec2Client, Ec2Error, Ec2Provider, InstanceSource,
    InventoryConfig, ProviderError, TagFilter, build_inventory,
};
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const XML: &str = "text/xml;charset=UTF-8";

fn credentials() -> Credentials {
    Credentials {
        access_key_id: "AKIDEXAMPLE".to_string(),
        secret_access_key: "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY".to_string(),
    }
}

fn describe_response(reservations: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<DescribeInstancesResponse xmlns="http://ec2.amazonaws.com/doc/2016-11-15/">
    <requestId>8f7724cf-496f-496e-8fe3-example</requestId>
    <reservationSet>{}</reservationSet>
</DescribeInstancesResponse>"#,
        reservations
    )
}

fn error_response(code: &str, message: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Response><Errors><Error><Code>{}</Code><Message>{}</Message></Error></Errors><RequestID>ea966190-f9aa-478e-9ede-example</RequestID></Response>"#,
        code, message
    )
}

#[tokio::test]
async fn test_describe_sends_tag_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("Action=DescribeInstances"))
        .and(body_string_contains("Filter.1.Name=tag%3ARole"))
        .and(body_string_contains("Filter.1.Value.1=webserver"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(describe_response(""), XML))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        Ec2Client::with_endpoint_url(&credentials(), "us-east-2", Some(&mock_server.uri())).await;

    let instances = client
        .describe_tagged_instances(&TagFilter::default())
        .await
        .unwrap();

    assert!(instances.is_empty());
}

#[tokio::test]
async fn test_describe_flattens_reservations_in_order() {
    let mock_server = MockServer::start().await;

    let reservations = r#"
        <item>
            <reservationId>r-1</reservationId>
            <instancesSet>
                <item>
                    <instanceId>i-1</instanceId>
                    <dnsName>ec2-1-2-3-4.compute.amazonaws.com</dnsName>
                    <ipAddress>1.2.3.4</ipAddress>
                </item>
                <item>
                    <instanceId>i-2</instanceId>
                    <dnsName/>
                </item>
            </instancesSet>
        </item>
        <item>
            <reservationId>r-2</reservationId>
            <instancesSet>
                <item>
                    <instanceId>i-3</instanceId>
                    <ipAddress>5.6.7.8</ipAddress>
                </item>
            </instancesSet>
        </item>"#;

    Mock::given(method("POST"))
        .and(body_string_contains("Action=DescribeInstances"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(describe_response(reservations), XML),
        )
        .mount(&mock_server)
        .await;

    let client =
        Ec2Client::with_endpoint_url(&credentials(), "us-east-2", Some(&mock_server.uri())).await;

    let instances = client
        .describe_tagged_instances(&TagFilter::default())
        .await
        .unwrap();

    let ids: Vec<&str> = instances.iter().map(|i| i.instance_id.as_str()).collect();
    assert_eq!(ids, vec!["i-1", "i-2", "i-3"]);

    assert_eq!(instances[0].host_id(), "ec2-1-2-3-4.compute.amazonaws.com");
    assert_eq!(instances[0].address(), "1.2.3.4");
    assert_eq!(instances[1].host_id(), "i-2");
    assert_eq!(instances[1].address(), "i-2");
    assert_eq!(instances[2].host_id(), "i-3");
    assert_eq!(instances[2].address(), "5.6.7.8");
}

#[tokio::test]
async fn test_auth_failure_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_raw(
            error_response(
                "AuthFailure",
                "AWS was not able to validate the provided access credentials",
            ),
            XML,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        Ec2Client::with_endpoint_url(&credentials(), "us-east-2", Some(&mock_server.uri())).await;

    let result = client.describe_tagged_instances(&TagFilter::default()).await;

    match result {
        Err(Ec2Error::Auth { message }) => {
            assert!(message.contains("not able to validate"));
            assert!(!message.contains("AKIDEXAMPLE"));
        }
        other => panic!("expected Ec2Error::Auth, got {:?}", other),
    }
}

#[tokio::test]
async fn test_throttling_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_raw(
            error_response("RequestLimitExceeded", "Request limit exceeded."),
            XML,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        Ec2Client::with_endpoint_url(&credentials(), "us-east-2", Some(&mock_server.uri())).await;

    let result = client.describe_tagged_instances(&TagFilter::default()).await;

    assert!(
        matches!(result, Err(Ec2Error::Throttled { .. })),
        "expected Ec2Error::Throttled, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_unparseable_body_is_malformed_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not xml", XML))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        Ec2Client::with_endpoint_url(&credentials(), "us-east-2", Some(&mock_server.uri())).await;

    let result = client.describe_tagged_instances(&TagFilter::default()).await;

    assert!(
        matches!(result, Err(Ec2Error::MalformedResponse { .. })),
        "expected Ec2Error::MalformedResponse, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_provider_describe_instances() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("Filter.1.Value.1=frontend"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            describe_response(
                r#"<item><reservationId>r-9</reservationId><instancesSet>
                    <item><instanceId>i-9</instanceId></item>
                </instancesSet></item>"#,
            ),
            XML,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = Ec2Provider::with_endpoint_url(Some(mock_server.uri()));
    let request = DescribeRequest {
        credentials: credentials(),
        region: "us-east-2".to_string(),
        tag_filter: TagFilter::new("Tier", "frontend"),
    };

    let instances = provider.describe_instances(&request).await.unwrap();

    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].instance_id, "i-9");
}

#[tokio::test]
async fn test_end_to_end_inventory_against_mock_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("Action=DescribeInstances"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            describe_response(
                r#"<item><reservationId>r-1</reservationId><instancesSet>
                    <item>
                        <instanceId>i-1</instanceId>
                        <dnsName>ec2-1-2-3-4.compute.amazonaws.com</dnsName>
                        <ipAddress>1.2.3.4</ipAddress>
                    </item>
                </instancesSet></item>"#,
            ),
            XML,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = InventoryConfig {
        endpoint_url: Some(mock_server.uri()),
        ..InventoryConfig::default().with_credentials("AKIDEXAMPLE", "secret")
    };
    let provider = Ec2Provider::with_endpoint_url(config.endpoint_url.clone());

    let inventory = build_inventory(&config, &provider).await.unwrap();

    assert_eq!(inventory.all.hosts, vec!["ec2-1-2-3-4.compute.amazonaws.com"]);
    let vars = &inventory.meta.hostvars["ec2-1-2-3-4.compute.amazonaws.com"];
    assert_eq!(vars.ansible_host, "1.2.3.4");
    assert_eq!(vars.ansible_user, "ubuntu");
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    // Nothing listens on a port freed right after binding
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let provider = Ec2Provider::with_endpoint_url(Some(uri));
    let request = DescribeRequest {
        credentials: credentials(),
        region: "us-east-2".to_string(),
        tag_filter: TagFilter::default(),
    };

    let result = provider.describe_instances(&request).await;

    assert!(
        matches!(result, Err(ProviderError::Ec2(Ec2Error::Network { .. }))),
        "expected network error, got {:?}",
        result
    );
}
