//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/transactions/{transaction_id}', use [format_endpoint].

/// The route for creating and listing transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for getting a single transaction.
pub const TRANSACTION: &str = "/transactions/{transaction_id}";
/// The route for the balance of the session's transactions.
pub const SUMMARY: &str = "/transactions/summary";
/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/coffee";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// Assumes the endpoint has exactly one parameter wrapped in braces,
/// e.g. '/transactions/{transaction_id}'. If there is no parameter,
/// `endpoint_path` is returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: impl std::fmt::Display) -> String {
    match (endpoint_path.find('{'), endpoint_path.find('}')) {
        (Some(start), Some(end)) if start < end => format!(
            "{}{}{}",
            &endpoint_path[..start],
            id,
            &endpoint_path[end + 1..]
        ),
        _ => endpoint_path.to_owned(),
    }
}

#[cfg(test)]
mod format_endpoint_tests {
    use super::{TRANSACTIONS, format_endpoint};

    #[test]
    fn replaces_parameter() {
        let got = format_endpoint("/transactions/{transaction_id}", "abc");

        assert_eq!(got, "/transactions/abc");
    }

    #[test]
    fn replaces_parameter_in_middle() {
        let got = format_endpoint("/transactions/{transaction_id}/tags", 42);

        assert_eq!(got, "/transactions/42/tags");
    }

    #[test]
    fn leaves_endpoint_without_parameter_unchanged() {
        assert_eq!(format_endpoint(TRANSACTIONS, 1), TRANSACTIONS);
    }
}
