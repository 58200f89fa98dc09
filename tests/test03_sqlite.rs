#![cfg(feature = "sqlite")]
use std::time::Duration;

use chrono::NaiveDate;
use sql_localstore::prelude::*;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

async fn fetch(db: &Database, where_clause: Option<Condition>) -> Result<LazyResultView, Box<dyn std::error::Error>> {
    let view = match where_clause {
        Some(condition) => db.find("people", condition),
        None => db.find_all("people"),
    };
    timeout(WAIT, view.ready()).await?;
    Ok(view)
}

fn names(view: &LazyResultView) -> Vec<String> {
    view.iter()
        .filter_map(|row| row.get("name").and_then(RowValues::as_text).map(str::to_owned))
        .collect()
}

#[test]
fn sqlite_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let db = Database::try_open(SqliteOptions::new("round_trip"))?;
        assert_eq!(db.name(), "round_trip");
        assert_eq!(db.version(), Some(0));

        db.create_table("people", [("name", "text NOT NULL"), ("age", "integer")]);
        // Second create fails inside the engine and is swallowed.
        db.create_table("people", [("name", "text NOT NULL"), ("age", "integer")]);

        db.insert(
            "people",
            InsertValues::keyed([("name", RowValues::from("John")), ("age", RowValues::Int(30))]),
        );
        db.insert("people", vec![RowValues::from("Bob"), RowValues::Int(41)]);
        db.insert("people", vec![RowValues::from("Peter"), RowValues::Null]);

        let all = fetch(&db, None).await?;
        assert_eq!(all.status(), Status::Ready);
        assert_eq!(names(&all), vec!["John", "Bob", "Peter"]);
        assert!(all.at(3).is_none());

        let john = fetch(&db, Some(Condition::keyed([("name", "John")]))).await?;
        assert_eq!(john.length(), 1);
        assert_eq!(
            john.at(0).and_then(|row| row.get("age")),
            Some(&RowValues::Int(30))
        );

        db.update(
            "people",
            Condition::keyed([("age", 31_i64)]),
            Condition::paired("name = ?", "John"),
        );
        let older = fetch(&db, Some(Condition::paired("age > ?", 30_i64))).await?;
        assert_eq!(names(&older), vec!["John", "Bob"]);

        db.destroy("people", Condition::raw("age IS NULL"));
        let remaining = fetch(&db, None).await?;
        assert_eq!(remaining.length(), 2);

        let nobody = fetch(&db, Some(Condition::raw("name = 'Nobody'"))).await?;
        assert_eq!(nobody.status(), Status::Ready);
        assert_eq!(nobody.length(), 0);
        assert_eq!(nobody.iter().count(), 0);

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn abort_rolls_back_the_whole_batch() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let db = Database::try_open(SqliteOptions::new("abort"))?;
        db.create_table("people", [("name", "text NOT NULL")]);

        let (tx, rx) = oneshot::channel();
        db.transaction(
            vec![
                Statement::new("INSERT INTO people VALUES(?);", "John"),
                Statement::new("INSERT INTO people VALUES(?);", RowValues::Null),
            ],
            TransactionCallbacks::new()
                .on_query_error(|_, _| QueryErrorAction::Abort)
                .on_error(move |err| {
                    let _ = tx.send(err.to_string());
                }),
        );
        let message = timeout(WAIT, rx).await??;
        assert!(message.contains("statement 2 aborted"), "{message}");

        let all = fetch(&db, None).await?;
        assert_eq!(all.length(), 0);
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn continue_keeps_sibling_statements() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let db = Database::try_open(SqliteOptions::new("continue"))?;
        db.create_table("people", [("name", "text NOT NULL")]);

        let (failed_tx, failed_rx) = std::sync::mpsc::channel();
        let (done_tx, done_rx) = oneshot::channel();
        db.transaction(
            vec![
                Statement::new("INSERT INTO people VALUES(?);", "John"),
                Statement::new("INSERT INTO people VALUES(?);", RowValues::Null),
                Statement::new("INSERT INTO people VALUES(?);", "Bob"),
            ],
            TransactionCallbacks::new()
                .on_query_error(move |statement, err| {
                    let _ = failed_tx.send((statement.params.clone(), err.code()));
                    QueryErrorAction::Continue
                })
                .on_success(move || {
                    let _ = done_tx.send(());
                }),
        );
        timeout(WAIT, done_rx).await??;

        let (params, code) = failed_rx.try_recv()?;
        assert_eq!(params, vec![RowValues::Null]);
        assert!(code.is_some());

        let all = fetch(&db, None).await?;
        assert_eq!(names(&all), vec!["John", "Bob"]);
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn statement_results_report_changes() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let db = Database::try_open(SqliteOptions::new("changes"))?;
        db.create_table("people", [("id", "integer PRIMARY KEY"), ("name", "text")]);

        let (tx, rx) = std::sync::mpsc::channel();
        let (done_tx, done_rx) = oneshot::channel();
        db.transaction(
            vec![
                Statement::new("INSERT INTO people(name) VALUES(?);", "John"),
                Statement::new("INSERT INTO people(name) VALUES(?);", "Bob"),
                Statement::new("UPDATE people SET name = ? WHERE id > ?;", vec![
                    RowValues::from("Anon"),
                    RowValues::Int(0),
                ]),
            ],
            TransactionCallbacks::new()
                .on_query_data(move |_, rows| {
                    let _ = tx.send((rows.rows_affected, rows.last_insert_id));
                })
                .on_success(move || {
                    let _ = done_tx.send(());
                }),
        );
        timeout(WAIT, done_rx).await??;

        let reported: Vec<_> = rx.try_iter().collect();
        assert_eq!(reported, vec![(1, Some(1)), (1, Some(2)), (2, None)]);
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn typed_values_survive_storage() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let db = Database::try_open(SqliteOptions::new("typed"))?;
        db.create_table(
            "events",
            [
                ("active", "integer"),
                ("created_at", "text"),
                ("payload", "text"),
                ("data", "blob"),
                ("score", "real"),
            ],
        );

        let created_at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|day| day.and_hms_milli_opt(12, 30, 45, 250))
            .ok_or("invalid timestamp")?;
        let payload = serde_json::json!({ "kind": "signup", "count": 2 });
        db.insert(
            "events",
            InsertValues::keyed([
                ("active", RowValues::Bool(true)),
                ("created_at", RowValues::Timestamp(created_at)),
                ("payload", RowValues::JSON(payload.clone())),
                ("data", RowValues::Blob(vec![0, 1, 254])),
                ("score", RowValues::Float(0.5)),
            ]),
        );

        let view = db.find_all("events");
        timeout(WAIT, view.ready()).await?;
        let rows = view.rows().ok_or("view not populated")?;
        let columns = rows.get_column_names().ok_or("missing column names")?;
        assert_eq!(
            columns.as_slice(),
            ["active", "created_at", "payload", "data", "score"]
        );

        let row = view.at(0).ok_or("missing row")?;
        assert_eq!(row.get("active").and_then(RowValues::as_bool), Some(&true));
        assert_eq!(
            row.get("created_at").and_then(RowValues::as_timestamp),
            Some(created_at)
        );
        let stored_json = row.get("payload").and_then(RowValues::as_text).ok_or("payload")?;
        assert_eq!(serde_json::from_str::<serde_json::Value>(stored_json)?, payload);
        assert_eq!(row.get("data").and_then(RowValues::as_blob), Some(&[0_u8, 1, 254][..]));
        assert_eq!(row.get_by_index(4).and_then(RowValues::as_float), Some(0.5));
        assert!(row.get_by_index(5).is_none());
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn failed_find_stays_empty() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let db = Database::try_open(SqliteOptions::new("failed_find"))?;
        let view = db.find("missing_table", Condition::keyed([("name", "John")]));

        let waited = timeout(Duration::from_millis(300), view.ready()).await;
        assert!(waited.is_err());
        assert_eq!(view.status(), Status::Empty);
        assert_eq!(view.length(), 0);
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
