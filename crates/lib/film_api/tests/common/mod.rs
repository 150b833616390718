//! Shared helpers for router-level tests over in-memory stores.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use film_api::AppState;
use film_api::config::ApiConfig;
use film_core::stores::Stores;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const PASSWORD: &str = "pw123456";

/// Router with dev defaults and a cheap bcrypt cost.
pub fn app() -> Router {
    app_with(&[])
}

pub fn app_with(vars: &[(&str, &str)]) -> Router {
    app_from(config_with(vars))
}

/// Config read from `vars`, with the cheapest bcrypt cost.
pub fn config_with(vars: &[(&str, &str)]) -> ApiConfig {
    let vars: Vec<(String, String)> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let mut config = ApiConfig::from_lookup(|key| {
        vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    })
    .expect("test config");
    config.auth.bcrypt_cost = 4;
    config
}

/// Router over in-memory stores for an already-built config.
pub fn app_from(config: ApiConfig) -> Router {
    film_api::router(AppState::new(config, Stores::in_memory()))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// Value of a cookie set by this response.
    pub fn cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&prefix))
            .map(|v| {
                v[prefix.len()..]
                    .split(';')
                    .next()
                    .unwrap_or_default()
                    .to_string()
            })
    }

    /// Full `Set-Cookie` line for a cookie.
    pub fn set_cookie_line(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&prefix))
            .map(str::to_string)
    }
}

/// Builder for one request.
pub struct Call {
    method: Method,
    uri: String,
    body: Option<Value>,
    bearer: Option<String>,
    authorization: Option<String>,
    cookies: Vec<String>,
}

impl Call {
    pub fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_string(),
            body: None,
            bearer: None,
            authorization: None,
            cookies: Vec::new(),
        }
    }

    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    /// Raw `Authorization` header value.
    pub fn authorization(mut self, value: &str) -> Self {
        self.authorization = Some(value.to_string());
        self
    }

    pub fn cookie(mut self, name: &str, value: &str) -> Self {
        self.cookies.push(format!("{name}={value}"));
        self
    }

    pub async fn send(self, app: &Router) -> TestResponse {
        let mut builder = Request::builder().method(self.method).uri(self.uri);
        if let Some(token) = self.bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(value) = self.authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        if !self.cookies.is_empty() {
            builder = builder.header(COOKIE, self.cookies.join("; "));
        }
        let body = match self.body {
            Some(json) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let resp = app
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("response");

        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }
}

pub async fn signup(app: &Router, email: &str) -> TestResponse {
    let resp = Call::post("/auth/signup")
        .json(json!({
            "email": email,
            "password": PASSWORD,
            "first_name": "Alice",
            "last_name": "Liddell",
        }))
        .send(app)
        .await;
    assert_eq!(resp.status, StatusCode::CREATED, "signup failed: {}", resp.body);
    resp
}

pub async fn login(app: &Router, email: &str, password: &str) -> TestResponse {
    Call::post("/auth/login")
        .json(json!({ "email": email, "password": password }))
        .send(app)
        .await
}

/// Sign up and log in; returns `(access_token, refresh_token)`.
pub async fn session(app: &Router, email: &str) -> (String, String) {
    signup(app, email).await;
    let resp = login(app, email, PASSWORD).await;
    assert_eq!(resp.status, StatusCode::OK);
    (
        resp.body["access_token"].as_str().expect("access_token").to_string(),
        resp.body["refresh_token"].as_str().expect("refresh_token").to_string(),
    )
}
