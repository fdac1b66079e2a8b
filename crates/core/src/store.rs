//! Collaborator contracts for the hosted document store, object storage and
//! geocoding service, plus the small query language the screens use.

use std::cmp::Ordering;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::StudyResult;
use crate::models::user::Coordinate;
use crate::record::{Record, parse_timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    /// A record missing the field never matches.
    pub fn matches(&self, record: &Record) -> bool {
        let Some(actual) = record.get(&self.field) else {
            return false;
        };

        let ordering = compare_values(actual, &self.value);
        match self.op {
            FilterOp::Eq => *actual == self.value || ordering == Some(Ordering::Equal),
            FilterOp::Lt => ordering == Some(Ordering::Less),
            FilterOp::Lte => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
            FilterOp::Gt => ordering == Some(Ordering::Greater),
            FilterOp::Gte => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Filter predicates, ordering and limit for one collection fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    fn filter(mut self, field: &str, op: FilterOp, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field: field.to_string(),
            op,
            value: value.into(),
        });
        self
    }

    pub fn where_eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOp::Eq, value)
    }

    pub fn where_lt(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOp::Lt, value)
    }

    pub fn where_lte(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOp::Lte, value)
    }

    pub fn where_gt(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOp::Gt, value)
    }

    pub fn where_gte(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOp::Gte, value)
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.to_string(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }

    pub fn equality_filters(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter().filter(|f| f.op == FilterOp::Eq)
    }

    /// Evaluates the query over records in store order.
    ///
    /// Sorting is stable; records missing the order field sort last in both
    /// directions.
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        let mut matched: Vec<Record> = records.into_iter().filter(|r| self.matches(r)).collect();

        if let Some(order) = &self.order_by {
            matched.sort_by(|a, b| {
                let (a, b) = (a.get(&order.field), b.get(&order.field));
                match (a, b) {
                    (None, None) => Ordering::Equal,
                    (None, Some(_)) => Ordering::Greater,
                    (Some(_), None) => Ordering::Less,
                    (Some(a), Some(b)) => {
                        let ordering = total_order(a, b);
                        match order.direction {
                            Direction::Ascending => ordering,
                            Direction::Descending => ordering.reverse(),
                        }
                    }
                }
            });
        }

        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }

        matched
    }
}

/// Compares two stored values for filtering. Values of unrelated types are
/// incomparable and make range filters fail.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        _ => match (parse_timestamp(a), parse_timestamp(b)) {
            (Some(x), Some(y)) => Some(x.cmp(&y)),
            _ => match (a, b) {
                (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
                (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
                (Value::Null, Value::Null) => Some(Ordering::Equal),
                _ => None,
            },
        },
    }
}

// Every stored timestamp shape shares one rank so mixed shapes sort by instant.
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        _ if parse_timestamp(value).is_some() => 2,
        Value::Number(_) => 3,
        Value::String(_) => 4,
        Value::Array(_) | Value::Object(_) => 5,
    }
}

// Sorting needs a total order even across mixed types.
fn total_order(a: &Value, b: &Value) -> Ordering {
    let (rank_a, rank_b) = (type_rank(a), type_rank(b));
    if rank_a != rank_b {
        return rank_a.cmp(&rank_b);
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ if rank_a == 2 => parse_timestamp(a).cmp(&parse_timestamp(b)),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .unwrap_or_default()
            .total_cmp(&y.as_f64().unwrap_or_default()),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Query/write capability of the hosted document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn fetch_collection(&self, collection: &str, query: &Query) -> StudyResult<Vec<Record>>;

    async fn get_document(&self, collection: &str, id: &str) -> StudyResult<Option<Record>>;

    /// Inserts a document under a generated id and returns that id.
    async fn add_document(&self, collection: &str, fields: Map<String, Value>) -> StudyResult<String>;

    /// Creates or replaces the document with the given id.
    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> StudyResult<()>;

    /// Merges fields into an existing document; `NotFound` if it does not exist.
    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> StudyResult<()>;
}

/// Resolves free-text locations to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, location: &str) -> StudyResult<Coordinate>;
}

/// Object storage for uploaded images, notes and recordings.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Stores the bytes and returns a URL the blob can be fetched from.
    async fn put_blob(&self, path: &str, bytes: Vec<u8>) -> StudyResult<String>;

    async fn get_blob(&self, path: &str) -> StudyResult<Vec<u8>>;
}
