use baofin_core::{
    with_session, FailureKind, IndicatorFamily, ProviderFault, QueryOutcome, RemoteQuery,
    ScriptedProvider, ScriptedResponse, StockCode,
};

struct StatusCase {
    name: &'static str,
    response: ScriptedResponse,
    expected: FailureKind,
}

fn status_cases() -> Vec<StatusCase> {
    vec![
        StatusCase {
            name: "no-record code",
            response: ScriptedResponse::status("10002", "whatever the text"),
            expected: FailureKind::NoDataFound,
        },
        StatusCase {
            name: "no-record message, other code",
            response: ScriptedResponse::status("10004011", "No Record Found for this code"),
            expected: FailureKind::NoDataFound,
        },
        StatusCase {
            name: "other status",
            response: ScriptedResponse::status("10001001", "network receive error"),
            expected: FailureKind::RemoteError,
        },
        StatusCase {
            name: "ok but empty",
            response: ScriptedResponse::empty(&["code", "statDate"]),
            expected: FailureKind::NoDataFound,
        },
        StatusCase {
            name: "call fault",
            response: ScriptedResponse::fault("connection reset"),
            expected: FailureKind::RemoteError,
        },
        StatusCase {
            name: "cursor fault mid-drain",
            response: ScriptedResponse::cursor_fault(&["code"], &[&["a"], &["b"], &["c"]], 2),
            expected: FailureKind::RemoteError,
        },
        StatusCase {
            name: "malformed payload",
            response: ScriptedResponse::Fault(ProviderFault::Malformed("truncated frame".into())),
            expected: FailureKind::RemoteError,
        },
    ]
}

fn query() -> RemoteQuery {
    RemoteQuery::new(
        IndicatorFamily::CashFlow,
        StockCode::parse("600000.SH").expect("valid code"),
        "2023",
        2,
    )
    .expect("valid query")
}

fn run(response: ScriptedResponse) -> (QueryOutcome, ScriptedProvider) {
    let mut provider = ScriptedProvider::new().with_family(IndicatorFamily::CashFlow, response);
    let outcome = with_session(&mut provider, |session| Ok(session.execute(&query())))
        .expect("login accepted");
    (outcome, provider)
}

#[test]
fn every_failure_mode_is_classified() {
    for case in status_cases() {
        let (outcome, _) = run(case.response);
        match outcome {
            QueryOutcome::Failure(failure) => {
                assert_eq!(failure.kind(), case.expected, "case '{}'", case.name)
            }
            QueryOutcome::Rows(rows) => panic!("case '{}' returned rows: {rows:?}", case.name),
        }
    }
}

#[test]
fn ok_status_drains_every_row_with_cursor_columns() {
    let (outcome, _) = run(ScriptedResponse::rows(
        &["code", "statDate", "CFOToNP"],
        &[
            &["sh.600000", "2023-06-30", "1.1"],
            &["sh.600000", "2023-06-30", "1.2"],
            &["sh.600000", "2023-06-30", "1.3"],
        ],
    ));

    let QueryOutcome::Rows(result) = outcome else {
        panic!("expected rows");
    };
    assert_eq!(result.columns, ["code", "statDate", "CFOToNP"]);
    assert_eq!(result.len(), 3);
    assert_eq!(result.rows[2][2], "1.3");
}

#[test]
fn unexpected_faults_carry_query_context() {
    let (outcome, _) = run(ScriptedResponse::fault("connection reset"));

    let QueryOutcome::Failure(failure) = outcome else {
        panic!("expected failure");
    };
    let message = failure.message();
    assert!(message.contains("Cash Flow"), "{message}");
    assert!(message.contains("sh.600000"), "{message}");
    assert!(message.contains("2023Q2"), "{message}");
    assert!(message.contains("connection reset"), "{message}");
}

#[test]
fn remote_status_failures_carry_the_provider_message() {
    let (outcome, _) = run(ScriptedResponse::status("10001001", "network receive error"));

    let error = outcome.into_result().expect_err("remote failure");
    assert!(error.message().contains("network receive error"));
    assert!(error.message().contains("10001001"));
}

#[test]
fn query_parameters_reach_the_provider_unchanged() {
    let (_, provider) = run(ScriptedResponse::no_record());

    let sent = &provider.queries()[0];
    assert_eq!(sent.operation(), "query_cash_flow_data");
    assert_eq!(sent.code().as_str(), "sh.600000");
    assert_eq!(sent.year(), "2023");
    assert_eq!(sent.quarter(), 2);
}
