//! Application router configuration with session-protected and open route definitions.

use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    AppState, Error, endpoints,
    session::session_guard,
    transaction::{
        LedgerStore, create_transaction_endpoint, get_summary_endpoint, get_transaction_endpoint,
        list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<L>(state: AppState<L>) -> Router
where
    L: LedgerStore + Clone + Send + Sync + 'static,
{
    let open_routes = Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .route(
            endpoints::TRANSACTIONS,
            post(create_transaction_endpoint::<L>),
        );

    // Reading requires an existing session, there is nothing to read otherwise.
    let session_routes = Router::new()
        .route(endpoints::TRANSACTIONS, get(list_transactions_endpoint::<L>))
        .route(endpoints::SUMMARY, get(get_summary_endpoint::<L>))
        .route(endpoints::TRANSACTION, get(get_transaction_endpoint::<L>))
        .route_layer(middleware::from_fn_with_state(state.clone(), session_guard));

    session_routes
        .merge(open_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, Html("I'm a teapot")).into_response()
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}

#[cfg(test)]
mod routing_tests {
    use axum::http::StatusCode;
    use axum_extra::extract::cookie::Cookie;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        AppState, build_router,
        endpoints::{self, format_endpoint},
        error::ErrorBody,
        session::COOKIE_SESSION_ID,
        transaction::{
            CreatedTransaction, SummaryResponse, TransactionId, TransactionList,
            TransactionResponse,
        },
    };

    fn get_test_server() -> TestServer {
        let conn = Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(conn, "42").expect("Could not create app state.");

        TestServer::new(build_router(state))
    }

    /// Create a transaction and return its ID and the session cookie.
    ///
    /// Pass `None` as the cookie to start a new session.
    async fn create_transaction(
        server: &TestServer,
        cookie: Option<Cookie<'static>>,
        title: &str,
        amount: f64,
        transaction_type: &str,
    ) -> (TransactionId, Cookie<'static>) {
        let mut request = server.post(endpoints::TRANSACTIONS).json(&json!({
            "title": title,
            "amount": amount,
            "type": transaction_type,
        }));
        if let Some(cookie) = &cookie {
            request = request.add_cookie(cookie.clone());
        }

        let response = request.await;
        response.assert_status(StatusCode::CREATED);
        let id = response.json::<CreatedTransaction>().id;

        match cookie {
            Some(cookie) => (id, cookie),
            None => (id, response.cookie(COOKIE_SESSION_ID)),
        }
    }

    #[tokio::test]
    async fn create_starts_a_session() {
        let server = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({ "title": "Salary", "amount": 1000, "type": "credit" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let cookie = response.cookie(COOKIE_SESSION_ID);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
    }

    #[tokio::test]
    async fn create_with_session_does_not_reissue_cookie() {
        let server = get_test_server();
        let (_, cookie) = create_transaction(&server, None, "Salary", 1000.0, "credit").await;

        let response = server
            .post(endpoints::TRANSACTIONS)
            .add_cookie(cookie)
            .json(&json!({ "title": "Rent", "amount": 500, "type": "debit" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert!(response.maybe_cookie(COOKIE_SESSION_ID).is_none());
    }

    #[tokio::test]
    async fn get_returns_created_transaction() {
        let server = get_test_server();
        let (id, cookie) = create_transaction(&server, None, "Rent", 500.0, "debit").await;

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, id))
            .add_cookie(cookie)
            .await;

        response.assert_status_ok();
        let transaction = response.json::<TransactionResponse>().transaction;
        assert_eq!(transaction.id, id);
        assert_eq!(transaction.title.as_str(), "Rent");
        assert_eq!(transaction.amount, -500.0);
    }

    #[tokio::test]
    async fn title_is_returned_as_sent() {
        let server = get_test_server();
        let (id, cookie) = create_transaction(&server, None, "  Rent ", 500.0, "debit").await;

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, id))
            .add_cookie(cookie)
            .await;

        response.assert_status_ok();
        let transaction = response.json::<TransactionResponse>().transaction;
        assert_eq!(transaction.title.as_str(), "  Rent ");
    }

    #[tokio::test]
    async fn get_from_another_session_is_not_found() {
        let server = get_test_server();
        let (id, _) = create_transaction(&server, None, "Salary", 1000.0, "credit").await;
        let (_, other_cookie) = create_transaction(&server, None, "Gift", 200.0, "credit").await;

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, id))
            .add_cookie(other_cookie)
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_with_malformed_id_is_bad_request() {
        let server = get_test_server();
        let (_, cookie) = create_transaction(&server, None, "Salary", 1000.0, "credit").await;

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, "not-a-uuid"))
            .add_cookie(cookie)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn reads_without_session_are_unauthorized() {
        let server = get_test_server();
        let paths = [
            endpoints::TRANSACTIONS.to_owned(),
            endpoints::SUMMARY.to_owned(),
            format_endpoint(endpoints::TRANSACTION, TransactionId::generate()),
        ];

        for path in paths {
            let response = server.get(&path).await;

            response.assert_status(StatusCode::UNAUTHORIZED);
            response.assert_json(&ErrorBody {
                error: "Unauthorized.".to_owned(),
            });
        }
    }

    #[tokio::test]
    async fn sessions_are_isolated_end_to_end() {
        let server = get_test_server();
        let (salary, s1) = create_transaction(&server, None, "Salary", 1000.0, "credit").await;
        let (rent, s1) = create_transaction(&server, Some(s1), "Rent", 500.0, "debit").await;

        let summary = server.get(endpoints::SUMMARY).add_cookie(s1.clone()).await;
        summary.assert_status_ok();
        assert_eq!(summary.json::<SummaryResponse>().summary.amount, 500.0);

        let (gift, s2) = create_transaction(&server, None, "Gift", 200.0, "credit").await;

        let list = server
            .get(endpoints::TRANSACTIONS)
            .add_cookie(s1.clone())
            .await;
        list.assert_status_ok();
        let mut got_ids: Vec<_> = list
            .json::<TransactionList>()
            .transactions
            .into_iter()
            .map(|transaction| transaction.id.to_string())
            .collect();
        got_ids.sort();
        let mut want_ids = vec![salary.to_string(), rent.to_string()];
        want_ids.sort();
        assert_eq!(got_ids, want_ids);
        assert!(!got_ids.contains(&gift.to_string()));

        let s2_summary = server.get(endpoints::SUMMARY).add_cookie(s2).await;
        assert_eq!(s2_summary.json::<SummaryResponse>().summary.amount, 200.0);
        let s1_summary = server.get(endpoints::SUMMARY).add_cookie(s1).await;
        assert_eq!(s1_summary.json::<SummaryResponse>().summary.amount, 500.0);
    }

    #[tokio::test]
    async fn summary_nets_credits_and_debits() {
        let server = get_test_server();
        let (_, cookie) = create_transaction(&server, None, "Refund", 25.0, "credit").await;
        let (_, cookie) = create_transaction(&server, Some(cookie), "Again", 25.0, "debit").await;

        let response = server.get(endpoints::SUMMARY).add_cookie(cookie).await;

        response.assert_status_ok();
        response.assert_json(&json!({ "summary": { "amount": 0.0 } }));
    }

    #[tokio::test]
    async fn create_rejects_invalid_amounts() {
        let server = get_test_server();

        for amount in [0.0, -10.0, 1e308] {
            let response = server
                .post(endpoints::TRANSACTIONS)
                .json(&json!({ "title": "Broken", "amount": amount, "type": "debit" }))
                .await;

            response.assert_status(StatusCode::BAD_REQUEST);
            assert!(response.maybe_cookie(COOKIE_SESSION_ID).is_none());
        }
    }

    #[tokio::test]
    async fn create_rejects_empty_title() {
        let server = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({ "title": "  ", "amount": 10, "type": "credit" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&ErrorBody {
            error: "transaction title cannot be empty".to_owned(),
        });
    }

    #[tokio::test]
    async fn create_rejects_unknown_type() {
        let server = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({ "title": "Refund", "amount": 10, "type": "refund" }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        let response = server.get("/nope").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn coffee_is_a_teapot() {
        let server = get_test_server();

        server
            .get(endpoints::COFFEE)
            .await
            .assert_status(StatusCode::IM_A_TEAPOT);
    }
}
