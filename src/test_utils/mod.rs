#![allow(missing_docs)]

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{Json, Router, response::Response, routing::get};
use rusqlite::Connection;
use serde_json::Value;
use time::OffsetDateTime;
use tokio::net::TcpListener;

use crate::{dataset::replace_transactions, db::initialize, transaction::NewTransaction};

/// An in-memory database with the tables created.
pub(crate) fn get_test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}

/// A sale whose description repeats the title and never mentions the category.
pub(crate) fn new_sale(
    title: &str,
    price: f64,
    sold: bool,
    category: &str,
    date_of_sale: OffsetDateTime,
) -> NewTransaction {
    NewTransaction {
        title: title.to_owned(),
        description: format!("A {title} for sale"),
        price,
        category: category.to_owned(),
        sold,
        date_of_sale,
        image: "https://example.com/image.jpg".to_owned(),
    }
}

/// Replace the contents of `conn` with `sales`.
pub(crate) fn seed(conn: &Connection, sales: Vec<NewTransaction>) {
    replace_transactions(&sales, conn).unwrap();
}

pub(crate) fn shared(conn: Connection) -> Arc<Mutex<Connection>> {
    Arc::new(Mutex::new(conn))
}

pub(crate) async fn response_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    serde_json::from_slice(&body).unwrap()
}

/// Serve `router` on a random local port until the test ends.
pub(crate) async fn spawn_server(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

/// Serve `payload` at `/snapshot.json`, returning its URL.
pub(crate) async fn serve_json(payload: Value) -> String {
    let router = Router::new().route(
        "/snapshot.json",
        get(move || async move { Json(payload) }),
    );
    let addr = spawn_server(router).await;

    format!("http://{addr}/snapshot.json")
}

/// A URL on a local port that nothing listens on.
pub(crate) async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{addr}/snapshot.json")
}
