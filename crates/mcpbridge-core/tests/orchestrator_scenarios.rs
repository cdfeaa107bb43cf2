//! End-to-end query scenarios against the in-process demo tools

mod common;

use serde_json::json;

use mcpbridge_core::{
    BridgeError, MessageRole, MockResponse, ProviderError, QueryState, ToolCall, ToolFailureKind,
};

use common::scripted_orchestrator;

#[tokio::test]
async fn plain_answer_uses_one_round() {
    let (mut orch, model, log) =
        scripted_orchestrator(vec![MockResponse::text("Paris is the capital of France.")]).await;

    let outcome = orch.process_query("capital of France?").await.unwrap();

    assert_eq!(outcome.text, "Paris is the capital of France.");
    assert_eq!(outcome.rounds, 1);
    assert!(outcome.tool_results.is_empty());
    assert!(log.calls().is_empty());

    let requests = model.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].offers_tools());
    assert_eq!(requests[0].tools.as_ref().unwrap().len(), 5);
    assert_eq!(requests[0].max_output_tokens, 1000);

    assert!(orch.history().iter().all(|m| m.role != MessageRole::Tool));
    orch.shutdown().await.unwrap();
}

#[tokio::test]
async fn echo_returns_message_verbatim() {
    let (mut orch, _model, _log) = scripted_orchestrator(vec![
        MockResponse::tool_calls(vec![ToolCall::from_value(
            "call_echo",
            "echo",
            &json!({ "message": "hello" }),
        )]),
        MockResponse::text("The tool said hello."),
    ])
    .await;

    let outcome = orch.process_query("echo hello").await.unwrap();

    assert_eq!(outcome.tool_results[0].content_text(), "hello");
    assert_eq!(
        outcome.text,
        "[Tool echo called with args {\"message\":\"hello\"}]\nhello\nThe tool said hello."
    );
    orch.shutdown().await.unwrap();
}

#[tokio::test]
async fn temperature_conversion_is_exact() {
    let (mut orch, _model, log) = scripted_orchestrator(vec![
        MockResponse::tool_calls(vec![ToolCall::from_value(
            "call_temp",
            "convert_temperature",
            &json!({ "value": 100, "unit": "F" }),
        )]),
        MockResponse::text("100 °F is about 37.8 °C."),
    ])
    .await;

    let outcome = orch.process_query("convert 100 F to C").await.unwrap();

    assert_eq!(outcome.tool_results[0].content_text(), "100.00 °F is 37.78 °C");
    assert_eq!(log.calls()[0].1, json!({ "value": 100, "unit": "F" }));
    orch.shutdown().await.unwrap();
}

#[tokio::test]
async fn dice_roll_result_reaches_follow_up() {
    let (mut orch, model, _log) = scripted_orchestrator(vec![
        MockResponse::tool_calls(vec![ToolCall::from_value(
            "call_dice",
            "dice_roll",
            &json!({ "sides": 6 }),
        )]),
        MockResponse::text("You rolled the die."),
    ])
    .await;

    let outcome = orch.process_query("roll a 6 sided die").await.unwrap();

    let rolled = outcome.tool_results[0].content_text();
    let value: i64 = rolled
        .strip_prefix("🎲 Rolled a 6-sided die: ")
        .expect("dice output prefix")
        .parse()
        .expect("dice output number");
    assert!((1..=6).contains(&value));
    assert!(outcome.text.contains(&rolled));

    // The follow-up request carries the tool output and offers no tools
    let follow_up = &model.requests()[1];
    assert!(!follow_up.offers_tools());
    let last = follow_up.messages.last().unwrap();
    assert_eq!(last.role, MessageRole::Tool);
    assert_eq!(last.tool_call_id.as_deref(), Some("call_dice"));
    assert_eq!(last.text(), Some(rolled.as_str()));
    orch.shutdown().await.unwrap();
}

#[tokio::test]
async fn multiple_calls_run_in_order_with_paired_messages() {
    let calls = vec![
        ToolCall::from_value("c1", "word_count", &json!({ "text": "one two three" })),
        ToolCall::from_value("c2", "add", &json!({ "a": 2, "b": 3.5 })),
        ToolCall::from_value("c3", "echo", &json!({ "message": "done" })),
    ];
    let (mut orch, model, log) = scripted_orchestrator(vec![
        MockResponse::text_and_tool_calls("Working on it.", calls),
        MockResponse::text("All three finished."),
    ])
    .await;

    let outcome = orch.process_query("do three things").await.unwrap();

    assert_eq!(log.call_names(), vec!["word_count", "add", "echo"]);
    let contents: Vec<_> = outcome.tool_results.iter().map(|r| r.content_text()).collect();
    assert_eq!(
        contents,
        vec!["The text contains 3 words.", "2.0 + 3.5 = 5.5", "done"]
    );

    // user, then (assistant tool call, tool result) x3
    let follow_up = &model.requests()[1];
    assert_eq!(follow_up.messages.len(), 7);
    for (i, id) in ["c1", "c2", "c3"].iter().enumerate() {
        let call_msg = &follow_up.messages[1 + 2 * i];
        let result_msg = &follow_up.messages[2 + 2 * i];
        assert_eq!(call_msg.role, MessageRole::Assistant);
        assert_eq!(call_msg.tool_calls.as_ref().unwrap().len(), 1);
        assert_eq!(call_msg.tool_calls.as_ref().unwrap()[0].id, *id);
        assert_eq!(result_msg.role, MessageRole::Tool);
        assert_eq!(result_msg.tool_call_id.as_deref(), Some(*id));
    }

    let lines: Vec<_> = outcome.text.lines().collect();
    assert_eq!(lines.first(), Some(&"Working on it."));
    assert_eq!(lines.last(), Some(&"All three finished."));
    assert_eq!(outcome.rounds, 2);
    orch.shutdown().await.unwrap();
}

#[tokio::test]
async fn unknown_tool_is_reported_to_the_model() {
    let (mut orch, model, log) = scripted_orchestrator(vec![
        MockResponse::tool_calls(vec![ToolCall::new("c1", "teleport", r#"{"to":"mars"}"#)]),
        MockResponse::text("I can't do that."),
    ])
    .await;

    let outcome = orch.process_query("teleport me").await.unwrap();

    assert_eq!(
        outcome.tool_results[0].failure_kind(),
        Some(ToolFailureKind::ToolNotFound)
    );
    assert!(log.calls().is_empty());
    let tool_msg = model.requests()[1].messages.last().cloned().unwrap();
    assert_eq!(tool_msg.text(), Some("Error (tool not found): unknown tool 'teleport'"));
    assert!(outcome.text.ends_with("I can't do that."));
    orch.shutdown().await.unwrap();
}

#[tokio::test]
async fn bad_arguments_never_reach_the_server() {
    let (mut orch, _model, log) = scripted_orchestrator(vec![
        MockResponse::tool_calls(vec![
            ToolCall::new("c1", "echo", "{not json"),
            ToolCall::new("c2", "convert_temperature", r#"{"value":"hot","unit":"F"}"#),
        ]),
        MockResponse::text("Both failed."),
    ])
    .await;

    let outcome = orch.process_query("break things").await.unwrap();

    let kinds: Vec<_> = outcome.tool_results.iter().map(|r| r.failure_kind()).collect();
    assert_eq!(
        kinds,
        vec![
            Some(ToolFailureKind::ArgumentParse),
            Some(ToolFailureKind::InvalidArguments)
        ]
    );
    assert!(log.calls().is_empty());
    orch.shutdown().await.unwrap();
}

#[tokio::test]
async fn model_failure_is_isolated_to_its_query() {
    let (mut orch, _model, _log) = scripted_orchestrator(vec![
        MockResponse::error("quota exceeded"),
        MockResponse::text("Back online."),
    ])
    .await;

    let err = orch.process_query("first").await.unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Provider(ProviderError::ApiError { .. })
    ));
    assert!(orch.history().is_empty());
    assert_eq!(orch.state(), QueryState::Idle);
    assert!(orch.session().is_initialized());

    let outcome = orch.process_query("second").await.unwrap();
    assert_eq!(outcome.text, "Back online.");
    assert_eq!(orch.state(), QueryState::Done);
    orch.shutdown().await.unwrap();
}

#[tokio::test]
async fn failed_follow_up_leaves_no_orphaned_tool_calls() {
    let (mut orch, model, _log) = scripted_orchestrator(vec![
        MockResponse::tool_calls(vec![ToolCall::from_value("c1", "echo", &json!({ "message": "x" }))]),
        MockResponse::error("connection reset"),
        MockResponse::text("Recovered."),
    ])
    .await;

    assert!(orch.process_query("echo x").await.is_err());
    assert!(orch.history().is_empty());

    orch.process_query("hello again").await.unwrap();
    let last_request = model.requests().pop().unwrap();
    assert_eq!(last_request.messages.len(), 1);
    assert_eq!(last_request.messages[0].text(), Some("hello again"));
    orch.shutdown().await.unwrap();
}

#[tokio::test]
async fn history_carries_over_between_queries() {
    let (mut orch, model, _log) = scripted_orchestrator(vec![
        MockResponse::text("Hi Ada."),
        MockResponse::text("Your name is Ada."),
    ])
    .await;

    orch.process_query("my name is Ada").await.unwrap();
    orch.process_query("what is my name?").await.unwrap();

    let second = &model.requests()[1];
    let texts: Vec<_> = second.messages.iter().filter_map(|m| m.text()).collect();
    assert_eq!(texts, vec!["my name is Ada", "Hi Ada.", "what is my name?"]);
    orch.shutdown().await.unwrap();
}
