//! The fetch dispatcher.
//!
//! One [`ajax`] call makes exactly one network attempt and settles exactly
//! once. An optional timer races the fetch through the host's promise
//! machinery; the loser keeps running but its result is discarded, and the
//! timer is always cleared once the race settles.

use js_sys::{Array, Promise, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{DomParser, FormData, Headers, Request, RequestInit, SupportedType, Window};

use crate::response::{Body, Kind, Response};
use crate::settings::{Data, Method, Prepared, PreparedBody, Settings, prepare};
use crate::Error;

/// Dispatches a request described by [`Settings`].
///
/// # Errors
///
/// Returns [`Error::MissingUrl`] without touching the network when no URL
/// was supplied, [`Error::Aborted`] when the `before_send` hook vetoes the
/// dispatch, and transport, timeout, HTTP-status, or decode errors
/// afterwards. Every failure is routed through the `on_error` hook first,
/// when one is configured.
pub async fn ajax(mut settings: Settings) -> Result<Response, Error> {
    let mut on_error = settings.take_on_error();
    match run(settings).await {
        Ok(response) => Ok(response),
        Err(err) => {
            tracing::warn!(%err, "request failed");
            if let Some(hook) = on_error.as_mut() {
                hook(&err);
            }
            Err(err)
        }
    }
}

/// Issues a GET request.
///
/// # Errors
///
/// See [`ajax`].
pub async fn get(url: impl Into<String>) -> Result<Response, Error> {
    ajax(Settings::new(url)).await
}

/// Issues a POST request carrying the given data.
///
/// # Errors
///
/// See [`ajax`].
pub async fn post(url: impl Into<String>, data: impl Into<Data>) -> Result<Response, Error> {
    ajax(Settings::new(url).method(Method::Post).data(data)).await
}

/// Issues a PUT request carrying the given data.
///
/// # Errors
///
/// See [`ajax`].
pub async fn put(url: impl Into<String>, data: impl Into<Data>) -> Result<Response, Error> {
    ajax(Settings::new(url).method(Method::Put).data(data)).await
}

/// Issues a DELETE request.
///
/// # Errors
///
/// See [`ajax`].
pub async fn delete(url: impl Into<String>) -> Result<Response, Error> {
    ajax(Settings::new(url).method(Method::Delete)).await
}

async fn run(mut settings: Settings) -> Result<Response, Error> {
    if settings.url.trim().is_empty() {
        return Err(Error::MissingUrl);
    }
    if let Some(hook) = settings.take_before_send() {
        if !hook(&mut settings) {
            return Err(Error::Aborted);
        }
    }
    let timeout_ms = settings.timeout_ms;
    let prepared = prepare(&settings)?;
    dispatch(&prepared, timeout_ms).await
}

fn host_window() -> Result<Window, Error> {
    ripple_core::window().map_err(|err| Error::Transport(err.to_string()))
}

fn build_request(prepared: &Prepared) -> Result<Request, Error> {
    let init = RequestInit::new();
    init.set_method(prepared.method.as_str());

    let headers = Headers::new()?;
    for (name, value) in &prepared.headers {
        headers.set(name, value)?;
    }
    init.set_headers(headers.as_ref());

    match &prepared.body {
        Some(PreparedBody::Text(text)) => init.set_body(&JsValue::from_str(text)),
        Some(PreparedBody::Form(entries)) => {
            let form = FormData::new()?;
            for (name, value) in entries {
                form.append_with_str(name, value)?;
            }
            init.set_body(form.as_ref());
        }
        None => {}
    }

    Ok(Request::new_with_str_and_init(&prepared.url, &init)?)
}

async fn dispatch(prepared: &Prepared, timeout_ms: u32) -> Result<Response, Error> {
    let window = host_window()?;
    let request = build_request(prepared)?;
    let fetched = window.fetch_with_request(&request);

    let response = if timeout_ms > 0 {
        race_with_timer(&window, &fetched, timeout_ms).await?
    } else {
        JsFuture::from(fetched)
            .await?
            .dyn_into::<web_sys::Response>()
            .map_err(|_| Error::Transport("fetch settled without a response".into()))?
    };

    decode(response).await
}

/// Races the fetch against a host timer. Whichever settles first wins; the
/// loser is not canceled, its result is simply ignored. The timer is
/// cleared on every exit path.
async fn race_with_timer(
    window: &Window,
    fetched: &Promise,
    timeout_ms: u32,
) -> Result<web_sys::Response, Error> {
    let mut timer_id: Option<i32> = None;
    let timer = Promise::new(&mut |resolve, _reject| {
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            &resolve,
            i32::try_from(timeout_ms).unwrap_or(i32::MAX),
        ) {
            Ok(id) => timer_id = Some(id),
            Err(err) => tracing::warn!(?err, "failed to arm timeout timer"),
        }
    });

    let contenders = Array::of2(fetched, &timer);
    let outcome = JsFuture::from(Promise::race(&contenders)).await;
    if let Some(id) = timer_id {
        window.clear_timeout_with_handle(id);
    }

    // The timer resolves with `undefined`; only the fetch produces a
    // response object.
    match outcome {
        Ok(value) => value
            .dyn_into::<web_sys::Response>()
            .map_err(|_| Error::Timeout { ms: timeout_ms }),
        Err(err) => Err(Error::from(err)),
    }
}

async fn read_text(response: &web_sys::Response) -> Result<String, Error> {
    let text = JsFuture::from(response.text()?).await?;
    Ok(text.as_string().unwrap_or_default())
}

async fn decode(response: web_sys::Response) -> Result<Response, Error> {
    let status = response.status();
    if !response.ok() {
        let body = read_text(&response).await.ok().filter(|text| !text.is_empty());
        return Err(Error::Http { status, body });
    }

    let content_type = response.headers().get("content-type")?;
    let body = match Kind::from_content_type(content_type.as_deref()) {
        Kind::Json => {
            let text = read_text(&response).await?;
            serde_json::from_str(&text)
                .map(Body::Json)
                .map_err(|err| Error::Decode(err.to_string()))?
        }
        Kind::Text => Body::Text(read_text(&response).await?),
        Kind::Xml => {
            let text = read_text(&response).await?;
            let parser = DomParser::new()?;
            let document = parser
                .parse_from_string(&text, SupportedType::ApplicationXml)
                .map_err(|err| Error::Decode(format!("{err:?}")))?;
            Body::Xml(document)
        }
        Kind::Binary => {
            let buffer = JsFuture::from(response.array_buffer()?).await?;
            Body::Binary(Uint8Array::new(&buffer).to_vec())
        }
    };

    Ok(Response { status, body })
}
