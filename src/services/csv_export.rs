// CSV Export
// 21-column export of enriched articles

use chrono::{NaiveDate, Utc};

use crate::models::ArticleRecord;

pub const CSV_HEADERS: [&str; 21] = [
    "Article_ID",
    "Title",
    "Text_Body",
    "Date",
    "Source",
    "Author",
    "Category",
    "URL",
    "Image_URL",
    "Language",
    "Published_At",
    "Word_Count",
    "Reading_Time_Minutes",
    "Readability_Score",
    "Engagement_Score",
    "Virality_Rating",
    "Sentiment",
    "Reliability_Score",
    "Collection_Timestamp",
    "Keywords",
    "Description",
];

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Always wrapped in quotes, inner quotes doubled.
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Wrapped only when the value would otherwise break the row.
fn field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quoted(value)
    } else {
        value.to_string()
    }
}

fn categories(article: &ArticleRecord) -> String {
    if article.categories.is_empty() {
        article.category.clone()
    } else {
        article.categories.join("; ")
    }
}

pub fn article_row(article: &ArticleRecord) -> String {
    let cells = [
        field(&article.article_id),
        quoted(&article.title),
        quoted(&article.text_body),
        field(&article.date),
        field(&article.source),
        field(&article.author),
        field(&categories(article)),
        field(&article.url),
        field(&article.image_url),
        field(&article.language),
        field(&article.published_at),
        article.word_count.to_string(),
        article.reading_time.to_string(),
        article.readability.to_string(),
        article.engagement.to_string(),
        article.virality.as_str().to_string(),
        article.sentiment.as_str().to_string(),
        article.reliability_score.to_string(),
        field(&article.collection_timestamp),
        field(&article.keywords),
        quoted(&article.description),
    ];
    cells.join(",")
}

/// Header line plus one line per article, `\n`-separated.
pub fn articles_to_csv(articles: &[ArticleRecord]) -> String {
    std::iter::once(CSV_HEADERS.join(","))
        .chain(articles.iter().map(article_row))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("NewsCollector_Enhanced_Export_{}.csv", date.format("%Y-%m-%d"))
}

pub fn content_disposition(date: NaiveDate) -> String {
    format!("attachment; filename=\"{}\"", export_filename(date))
}

pub fn today_disposition() -> String {
    content_disposition(Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawArticle, SourceField};
    use crate::services::enrichment::ArticleEnricher;
    use crate::services::noise::NoNoise;
    use std::sync::Arc;

    fn record(title: &str) -> ArticleRecord {
        let raw = RawArticle {
            uuid: Some("id-1".to_string()),
            title: Some(title.to_string()),
            description: Some("Line one, \"quoted\"\nline two".to_string()),
            source: Some(SourceField::Name("Wire, Inc.".to_string())),
            url: Some("https://example.com/a".to_string()),
            ..Default::default()
        };
        ArticleEnricher::new(Arc::new(NoNoise)).process_article(&raw)
    }

    #[test]
    fn test_header_line() {
        let csv = articles_to_csv(&[]);
        assert_eq!(csv.split(',').count(), 21);
        assert!(csv.starts_with("Article_ID,Title,Text_Body"));
        assert!(csv.ends_with("Keywords,Description"));
    }

    #[test]
    fn test_title_is_always_quoted() {
        let row = article_row(&record("Plain title"));
        assert!(row.starts_with("id-1,\"Plain title\","));
    }

    #[test]
    fn test_optional_quoting() {
        assert_eq!(field("plain"), "plain");
        assert_eq!(field("a,b"), "\"a,b\"");
        assert_eq!(field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_round_trip_through_csv_reader() {
        let title = "He said \"yes\", then left";
        let article = record(title);
        let text = articles_to_csv(&[article.clone()]);

        let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), 21);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.len(), 21);
        assert_eq!(&row[0], "id-1");
        assert_eq!(&row[1], title);
        assert_eq!(&row[4], "Wire, Inc.");
        assert_eq!(&row[20], article.description);
        assert_eq!(&row[11], article.word_count.to_string());
    }

    #[test]
    fn test_filename() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(export_filename(date), "NewsCollector_Enhanced_Export_2025-03-09.csv");
        assert_eq!(
            content_disposition(date),
            "attachment; filename=\"NewsCollector_Enhanced_Export_2025-03-09.csv\""
        );
    }
}
