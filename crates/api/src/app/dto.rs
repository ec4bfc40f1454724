use warehouse_infra::FindOptions;

// -------------------------
// Query DTOs
// -------------------------

/// `GET /products` query. Values stay raw strings so a malformed or repeated
/// value is ignored instead of rejecting the request.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListProductsQuery {
    pub limit: Vec<String>,
    pub offset: Vec<String>,
}

impl ListProductsQuery {
    /// Collect the pagination parameters from decoded query pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "limit" => query.limit.push(value),
                "offset" => query.offset.push(value),
                _ => {}
            }
        }
        query
    }

    pub fn find_options(&self) -> FindOptions {
        FindOptions {
            skip: positive(&self.offset),
            limit: positive(&self.limit),
        }
    }
}

/// Parse a single positive integer; anything else means "not supplied".
///
/// Values are capped at `i64::MAX`, the largest offset/limit every store accepts.
fn positive(values: &[String]) -> Option<u64> {
    let [raw] = values else {
        return None;
    };
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
        .map(|n| n.min(i64::MAX as u64))
}
