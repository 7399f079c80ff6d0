use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// A stored book record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque identifier assigned at creation
    pub id: String,
    pub name: String,
    pub year: Option<i64>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<i64>,
    pub read_page: Option<i64>,
    /// Derived from `read_page == page_count` on every write
    pub finished: bool,
    pub reading: Option<bool>,
    #[serde(with = "time::serde::rfc3339")]
    pub inserted_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Book {
    pub fn to_summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }

    /// Overwrite every caller-supplied field, leaving `id` and `inserted_at` alone.
    pub(crate) fn apply(&mut self, payload: BookPayload, name: String, now: OffsetDateTime) {
        self.finished = payload.is_finished();
        self.name = name;
        self.year = payload.year;
        self.author = payload.author;
        self.summary = payload.summary;
        self.publisher = payload.publisher;
        self.page_count = payload.page_count.flatten();
        self.read_page = payload.read_page.flatten();
        self.reading = payload.reading;
        self.updated_at = now;
    }
}

/// Request body shared by create and update.
///
/// Unknown keys, `finished` included, are ignored. The page counts keep an
/// explicit `null` (`Some(None)`) apart from a missing key (`None`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: Option<i64>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub page_count: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    pub read_page: Option<Option<i64>>,
    pub reading: Option<bool>,
}

impl BookPayload {
    /// Counts must match exactly: null only equals null, missing only missing.
    pub fn is_finished(&self) -> bool {
        self.read_page == self.page_count
    }

    /// `Some((read_page, page_count))` when `readPage` is larger.
    ///
    /// A missing count never compares, while `null` counts as zero.
    pub fn read_page_overflow(&self) -> Option<(i64, i64)> {
        match (numeric(self.read_page), numeric(self.page_count)) {
            (Some(read_page), Some(page_count)) if read_page > page_count => {
                Some((read_page, page_count))
            }
            _ => None,
        }
    }
}

fn numeric(count: Option<Option<i64>>) -> Option<i64> {
    count.map(|value| value.unwrap_or(0))
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

/// List projection of a book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBook {
    pub book_id: String,
}

#[derive(Debug, Serialize)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Serialize)]
pub struct BookDetail {
    pub book: Book,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_reads_camel_case_and_ignores_finished() {
        let payload: BookPayload = serde_json::from_value(json!({
            "name": "Dune",
            "pageCount": 412,
            "readPage": 12,
            "reading": true,
            "finished": true
        }))
        .unwrap();

        assert_eq!(payload.name.as_deref(), Some("Dune"));
        assert_eq!(payload.page_count, Some(Some(412)));
        assert_eq!(payload.read_page, Some(Some(12)));
        assert!(!payload.is_finished());
    }

    #[test]
    fn explicit_null_count_is_kept_apart_from_missing() {
        let payload: BookPayload =
            serde_json::from_value(json!({"name": "A", "pageCount": null, "readPage": 5})).unwrap();

        assert_eq!(payload.page_count, Some(None));
        assert_eq!(payload.read_page, Some(Some(5)));
        assert_eq!(payload.read_page_overflow(), Some((5, 0)));
        assert!(!payload.is_finished());

        let missing: BookPayload =
            serde_json::from_value(json!({"name": "A", "readPage": 5})).unwrap();
        assert_eq!(missing.page_count, None);
        assert_eq!(missing.read_page_overflow(), None);
        assert!(!missing.is_finished());
    }

    #[test]
    fn null_read_page_never_overflows() {
        let payload: BookPayload =
            serde_json::from_value(json!({"name": "A", "pageCount": 10, "readPage": null})).unwrap();
        assert_eq!(payload.read_page_overflow(), None);

        let both_null: BookPayload =
            serde_json::from_value(json!({"name": "A", "pageCount": null, "readPage": null})).unwrap();
        assert_eq!(both_null.read_page_overflow(), None);
        assert!(both_null.is_finished());
    }

    #[test]
    fn payload_without_counts_is_finished() {
        let payload = BookPayload {
            name: Some("Untitled draft".to_string()),
            ..Default::default()
        };
        assert!(payload.is_finished());
    }

    #[test]
    fn book_serializes_with_wire_names() {
        let now = OffsetDateTime::UNIX_EPOCH;
        let book = Book {
            id: "abc".to_string(),
            name: "Dune".to_string(),
            year: Some(1965),
            author: Some("Frank Herbert".to_string()),
            summary: None,
            publisher: Some("Chilton".to_string()),
            page_count: Some(412),
            read_page: Some(412),
            finished: true,
            reading: Some(false),
            inserted_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["pageCount"], 412);
        assert_eq!(value["readPage"], 412);
        assert_eq!(value["insertedAt"], "1970-01-01T00:00:00Z");
        assert_eq!(value["updatedAt"], "1970-01-01T00:00:00Z");
        assert!(value["summary"].is_null());

        let summary = serde_json::to_value(book.to_summary()).unwrap();
        assert_eq!(
            summary,
            json!({"id": "abc", "name": "Dune", "publisher": "Chilton"})
        );
    }
}
