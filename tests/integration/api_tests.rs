//! API integration tests
//!
//! Each test serves its own router on an ephemeral port, so catalogs are not
//! shared between tests.

use biblioteca_server::{
    api::create_router,
    config::{AppConfig, IdStrategy},
    AppState,
};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

/// Start a server for `config` and return its base URL
async fn spawn_app_with(config: AppConfig) -> String {
    let app = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    format!("http://{}", addr)
}

async fn spawn_app() -> String {
    spawn_app_with(AppConfig::default()).await
}

async fn get_json(client: &Client, url: String) -> (StatusCode, Value) {
    let response = client.get(url).send().await.expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.expect("Failed to parse response");
    (status, body)
}

fn ids(books: &Value) -> Vec<i64> {
    books
        .as_array()
        .expect("Expected an array")
        .iter()
        .map(|book| book["id"].as_i64().expect("Book without id"))
        .collect()
}

#[tokio::test]
async fn test_welcome_page() {
    let base = spawn_app().await;

    let response = Client::new()
        .get(format!("{}/", base))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    let body = response.text().await.unwrap();
    assert!(body.contains("<h1>Biblioteca Online</h1>"));
}

#[tokio::test]
async fn test_list_seeded_books() {
    let base = spawn_app().await;
    let client = Client::new();

    let (status, body) = get_json(&client, format!("{}/livros", base)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3]);
    assert_eq!(body[0]["titulo"], "Clean Code");
    assert_eq!(body[0]["autor"], "Robert C. Martin");
    assert_eq!(body[0]["categoria"], "Programação");
    assert_eq!(body[0]["ano"], 2008);
}

#[tokio::test]
async fn test_get_book() {
    let base = spawn_app().await;
    let client = Client::new();

    let (status, body) = get_json(&client, format!("{}/livros/3", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["titulo"], "Design Patterns");

    let (status, body) = get_json(&client, format!("{}/livros/99", base)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"erro": "Livro não encontrado"}));

    let (status, body) = get_json(&client, format!("{}/livros/abc", base)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["erro"], "Livro não encontrado");
}

#[tokio::test]
async fn test_books_by_category_ignores_case_and_accents() {
    let base = spawn_app().await;
    let client = Client::new();

    for categoria in [
        "PROGRAMA%C3%87%C3%83O",
        "programacao",
        "Programa%C3%A7%C3%A3o",
        "Programação",
    ] {
        let (status, body) = get_json(&client, format!("{}/livros/categoria/{}", base, categoria)).await;
        assert_eq!(status, StatusCode::OK, "category {}", categoria);
        assert_eq!(ids(&body), vec![1, 2, 3]);
    }

    let (status, body) = get_json(&client, format!("{}/livros/categoria/culinaria", base)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"erro": "Nenhum livro encontrado nesta categoria"}));
}

#[tokio::test]
async fn test_create_get_delete_round() {
    let base = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/livros", base))
        .json(&json!({"titulo": "X", "autor": "Y", "categoria": "Programação", "ano": 2020}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["mensagem"], "Livro adicionado com sucesso");
    assert_eq!(body["livro"]["id"], 4);

    // Only id, titulo and autor are kept on create
    let (status, body) = get_json(&client, format!("{}/livros/4", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 4, "titulo": "X", "autor": "Y"}));

    let response = client
        .delete(format!("{}/livros/4", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["mensagem"], "Livro removido");
    assert_eq!(body["livro"]["id"], 4);

    let (status, _) = get_json(&client, format!("{}/livros/4", base)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_with_missing_fields() {
    let base = spawn_app().await;
    let client = Client::new();

    let payloads = [
        json!({"autor": "Y", "categoria": "Redes", "ano": 2020}),
        json!({"titulo": "", "autor": "Y", "categoria": "Redes", "ano": 2020}),
        json!({"titulo": "X", "autor": null, "categoria": "Redes", "ano": 2020}),
        json!({"titulo": "X", "autor": "Y", "categoria": "", "ano": 2020}),
        json!({"titulo": "X", "autor": "Y", "ano": 2020}),
        json!({"titulo": "X", "autor": "Y", "categoria": "Redes", "ano": 0}),
        json!({"titulo": "X", "autor": "Y", "categoria": "Redes"}),
        json!({}),
        json!(["X", "Y", "Redes", 2020]),
        json!("X"),
    ];

    for payload in payloads {
        let response = client
            .post(format!("{}/livros", base))
            .json(&payload)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "payload {}", payload);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"erro": "Preencha todos os campos"}));
    }

    let (_, body) = get_json(&client, format!("{}/livros", base)).await;
    assert_eq!(ids(&body), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_create_with_whole_float_year() {
    let base = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/livros", base))
        .header("content-type", "application/json")
        .body(r#"{"titulo": "X", "autor": "Y", "categoria": "Redes", "ano": 2020.0}"#)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["livro"]["id"], 4);
}

#[tokio::test]
async fn test_unrouted_paths_are_not_found() {
    let base = spawn_app().await;
    let client = Client::new();

    for path in ["/livros/", "/livros/categoria/", "/estantes"] {
        let (status, body) = get_json(&client, format!("{}{}", base, path)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "path {}", path);
        assert_eq!(body, json!({"erro": "Livro não encontrado"}));
    }
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let base = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/livros", base))
        .header("content-type", "application/json")
        .body("{\"titulo\": ")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["erro"].as_str().unwrap().starts_with("JSON inválido"));

    // No JSON content type at all
    let response = client
        .post(format!("{}/livros", base))
        .body("titulo=X")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (_, body) = get_json(&client, format!("{}/livros", base)).await;
    assert_eq!(ids(&body), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_update_book() {
    let base = spawn_app().await;
    let client = Client::new();
    let payload = json!({
        "titulo": "Clean Architecture",
        "autor": "Robert C. Martin",
        "categoria": "Arquitetura",
        "ano": 2017
    });

    let response = client
        .put(format!("{}/livros/1", base))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["mensagem"], "Livro atualizado com sucesso");
    assert_eq!(
        body["livro"],
        json!({"id": 1, "titulo": "Clean Architecture", "autor": "Robert C. Martin", "categoria": "Arquitetura", "ano": 2017})
    );

    let (status, body) = get_json(&client, format!("{}/livros/categoria/ARQUITETURA", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1]);
}

#[tokio::test]
async fn test_update_errors_leave_catalog_unchanged() {
    let base = spawn_app().await;
    let client = Client::new();
    let (_, before) = get_json(&client, format!("{}/livros", base)).await;

    // Unknown id is reported even when the body is also invalid
    let response = client
        .put(format!("{}/livros/42", base))
        .json(&json!({"titulo": ""}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["erro"], "Livro não encontrado");

    let response = client
        .put(format!("{}/livros/2", base))
        .json(&json!({"titulo": "X", "autor": "Y", "categoria": "Redes", "ano": 0}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["erro"], "Preencha todos os campos");

    let (_, after) = get_json(&client, format!("{}/livros", base)).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_delete_book() {
    let base = spawn_app().await;
    let client = Client::new();

    let response = client
        .delete(format!("{}/livros/2", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["livro"]["titulo"], "O Programador Pragmático");

    let (_, body) = get_json(&client, format!("{}/livros", base)).await;
    assert_eq!(ids(&body), vec![1, 3]);

    let response = client
        .delete(format!("{}/livros/2", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_length_ids_repeat_after_delete() {
    let base = spawn_app().await;
    let client = Client::new();

    client
        .delete(format!("{}/livros/2", base))
        .send()
        .await
        .expect("Failed to send request");
    let response = client
        .post(format!("{}/livros", base))
        .json(&json!({"titulo": "X", "autor": "Y", "categoria": "Redes", "ano": 2020}))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["livro"]["id"], 3);

    let (_, body) = get_json(&client, format!("{}/livros", base)).await;
    assert_eq!(ids(&body), vec![1, 3, 3]);
}

#[tokio::test]
async fn test_monotonic_ids_are_not_reused() {
    let mut config = AppConfig::default();
    config.catalog.id_strategy = IdStrategy::Monotonic;
    let base = spawn_app_with(config).await;
    let client = Client::new();

    client
        .delete(format!("{}/livros/3", base))
        .send()
        .await
        .expect("Failed to send request");
    let response = client
        .post(format!("{}/livros", base))
        .json(&json!({"titulo": "X", "autor": "Y", "categoria": "Redes", "ano": 2020}))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["livro"]["id"], 4);
}

#[tokio::test]
async fn test_health_check() {
    let base = spawn_app().await;
    let client = Client::new();

    let (status, body) = get_json(&client, format!("{}/health", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["livros"], 3);
}

#[tokio::test]
async fn test_openapi_document() {
    let base = spawn_app().await;
    let client = Client::new();

    let (status, body) = get_json(&client, format!("{}/api-docs/openapi.json", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/livros/{id}"].is_object());
}
