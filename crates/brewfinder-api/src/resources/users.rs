// User and auth endpoints
//
// Login stores the returned token on the session as a side effect; every
// later request carries it until logout clears it or another login
// overwrites it. Passwords are base64-encoded before send — a reversible
// transport encoding the backend expects, not a security measure.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::client::{BreweryClient, decode};
use crate::error::Error;
use crate::models::{LoginResponse, NewUser, UserActivation};
use crate::request::{CallArgs, Fields, RequestOptions};
use crate::session::ResponseEnvelope;

fn transport_encode(password: &SecretString) -> String {
    BASE64.encode(password.expose_secret())
}

#[derive(Deserialize)]
struct UsernameRow {
    username: String,
}

impl BreweryClient {
    /// Authenticate and store the returned token on the session.
    ///
    /// A response without a `token` field still resolves normally — the
    /// session is simply left untouched and callers must inspect
    /// [`LoginResponse::token`] themselves.
    ///
    /// `POST /users/login`
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
        remember: bool,
    ) -> Result<LoginResponse, Error> {
        let options = RequestOptions::new()
            .method(Method::POST)
            .field("username", username)
            .field("password", transport_encode(password))
            .field("remember", remember);

        let data = self
            .request(CallArgs::from_url("/users/login", options))
            .await?;
        let resp: LoginResponse = decode(data)?;

        match &resp.token {
            Some(token) => self.session().set_auth_token(token.clone()),
            None => debug!("login response carried no token"),
        }
        Ok(resp)
    }

    /// End the session. Returns the full envelope — callers want the
    /// status, not the payload — and clears the stored token.
    ///
    /// `POST /users/logout`
    pub async fn logout(&self) -> Result<ResponseEnvelope, Error> {
        let envelope = self
            .request_envelope(CallArgs::from_url(
                "/users/logout",
                RequestOptions::new().method(Method::POST),
            ))
            .await?;
        self.session().clear_auth_token();
        Ok(envelope)
    }

    /// All known usernames (for sign-up availability checks).
    ///
    /// `GET /users?fields=username`
    pub async fn fetch_usernames(&self) -> Result<Vec<String>, Error> {
        let options = RequestOptions::new().field("fields", "username");
        let rows: Vec<UsernameRow> =
            decode(self.request(CallArgs::from_url("/users", options)).await?)?;
        Ok(rows.into_iter().map(|r| r.username).collect())
    }

    /// Whether a user account has been activated.
    ///
    /// The backing store keeps the flag as a string; only the exact value
    /// `"True"` counts (legacy contract — not negotiable).
    ///
    /// `GET /users/{id}?fields=username,active,id`
    pub async fn user_is_active(&self, id: i64) -> Result<bool, Error> {
        let options = RequestOptions::new().field("fields", "username,active,id");
        let user: UserActivation = decode(
            self.request(CallArgs::from_url(format!("/users/{id}"), options))
                .await?,
        )?;
        Ok(user.active.as_deref() == Some("True"))
    }

    /// Register a new account.
    ///
    /// `POST /users/create`
    pub async fn create_user(&self, user: NewUser) -> Result<Value, Error> {
        let mut body = Fields::new();
        body.insert("name".to_owned(), user.name.into());
        body.insert("email".to_owned(), user.email.into());
        body.insert("username".to_owned(), user.username.into());
        body.insert(
            "password".to_owned(),
            transport_encode(&user.password).into(),
        );
        body.insert("activation_url".to_owned(), user.activation_url.into());

        let options = RequestOptions::new().method(Method::POST).body(body);
        self.request(CallArgs::from_url("/users/create", options))
            .await
    }

    /// Activate a pending account.
    ///
    /// `POST /users/{id}/activate`
    pub async fn activate_user(&self, id: i64) -> Result<Value, Error> {
        self.request(CallArgs::from_url(
            format!("/users/{id}/activate"),
            RequestOptions::new().method(Method::POST),
        ))
        .await
    }

    /// Auth smoke test — succeeds only with a valid token attached.
    ///
    /// `GET /users/welcome`
    pub async fn welcome(&self) -> Result<Value, Error> {
        self.request(CallArgs::get("/users/welcome")).await
    }
}
