#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use trivia_relay::{
	_preludet::*,
	error::UpstreamError,
	quiz::{Phase, QuizConfig, QuizEngine},
	upstream::{QuestionKind, QuestionQuery, ResponseCode},
};

const TWO_QUESTIONS: &str = r#"{"response_code":0,"results":[{"category":"Science%3A%20Computers","type":"boolean","difficulty":"easy","question":"The%20logo%20for%20Snapchat%20is%20a%20Bell.","correct_answer":"False","incorrect_answers":["True"]},{"category":"History","type":"boolean","difficulty":"medium","question":"Rome%20was%20built%20in%20a%20day.","correct_answer":"False","incorrect_answers":["True"]}]}"#;

const GRANT: &str =
	r#"{"response_code":0,"response_message":"Token Generated Successfully!","token":"http-token"}"#;

#[tokio::test]
async fn issue_and_fetch_over_http() {
	let server = MockServer::start_async().await;
	let (relay, store) =
		build_reqwest_test_relay(&server.base_url(), Arc::new(ManualClock::at_millis(0)));
	let token_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api_token.php").query_param("command", "request");
			then.status(200).header("content-type", "application/json").body(GRANT);
		})
		.await;
	let questions_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api.php")
				.query_param("amount", "2")
				.query_param("type", "boolean")
				.query_param("token", "http-token");
			then.status(200).header("content-type", "application/json").body(TWO_QUESTIONS);
		})
		.await;
	let session = relay.issue_token().await.expect("Issuing a token over HTTP should succeed.");

	assert_eq!(session.token.expose(), "http-token");
	assert_eq!(store.len(), 1);

	let batch = relay
		.fetch_questions(
			&QuestionQuery::new(2).with_kind(QuestionKind::Boolean),
			Some(&session.session_id),
		)
		.await
		.expect("Fetching questions over HTTP should succeed.");

	assert_eq!(batch.response_code, ResponseCode::Success);
	assert_eq!(batch.results.len(), 2);
	assert_eq!(batch.results[0].kind, "boolean");

	token_mock.assert_calls_async(1).await;
	questions_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn gate_denial_never_reaches_the_server() {
	let server = MockServer::start_async().await;
	let clock = Arc::new(ManualClock::at_millis(0));
	let (relay, _store) = build_reqwest_test_relay(&server.base_url(), clock.clone());
	let questions_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api.php");
			then.status(200).header("content-type", "application/json").body(TWO_QUESTIONS);
		})
		.await;
	let query = QuestionQuery::new(2);

	relay.fetch_questions(&query, None).await.expect("First fetch should pass the gate.");
	clock.advance_millis(2_500);

	let denied = relay.fetch_questions(&query, None).await.expect_err("Second fetch is too early.");

	assert!(matches!(
		denied,
		Error::RateLimited { retry_in } if retry_in == Duration::milliseconds(2_500)
	));
	assert_eq!(denied.status_code(), 429);

	questions_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
	let server = MockServer::start_async().await;
	let (relay, _store) =
		build_reqwest_test_relay(&server.base_url(), Arc::new(ManualClock::at_millis(0)));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api.php");
			then.status(200).header("content-type", "application/json").body(r#"{"results":[]}"#);
		})
		.await;
	let err = relay
		.fetch_questions(&QuestionQuery::new(1), None)
		.await
		.expect_err("A body without a response code should not parse.");

	assert!(matches!(err, Error::Upstream(UpstreamError::Parse { endpoint: "questions", .. })));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn quiz_plays_through_the_relay() {
	let server = MockServer::start_async().await;
	let (relay, _store) =
		build_reqwest_test_relay(&server.base_url(), Arc::new(ManualClock::at_millis(0)));

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api_token.php").query_param("command", "request");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"response_code":0,"token":"quiz-token"}"#);
		})
		.await;

	let questions_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api.php").query_param("amount", "2");
			then.status(200).header("content-type", "application/json").body(TWO_QUESTIONS);
		})
		.await;
	let config = QuizConfig { amount: 2, ..Default::default() }
		.with_feedback_delay(Duration::milliseconds(10));
	let engine: QuizEngine<ReqwestTestRelay> = QuizEngine::new(relay, config);

	assert_eq!(engine.start().await.expect("Starting the quiz should succeed."), Phase::Answering);

	for _ in 0..2 {
		let state = engine.state();
		let question = state.current_question().expect("A question should be on screen.");

		assert_eq!(question.display_answers().len(), 2);

		engine
			.select_answer(&question.question().correct_answer)
			.expect("Selecting an answer should succeed.");
		engine.settle_feedback().await;
	}

	let state = engine.state();

	assert_eq!(state.phase, Phase::Result);
	assert_eq!(state.score, 2);

	// The manual clock never moved, so the restart's fetch is refused by the gate.
	assert!(matches!(
		engine.restart().await.expect("Restarting from Result should be allowed."),
		Phase::Error(kind) if kind.is_recoverable()
	));

	questions_mock.assert_calls_async(1).await;
}
