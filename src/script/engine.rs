//! JavaScript execution on the Boa engine.
//!
//! The server sends code written for a browser page, so the engine
//! carries small stand-ins for the globals that code actually touches:
//! `document.title`, `window.localStorage` and `window.alert`. One
//! context lives for the whole page session, keeping user globals
//! across requests the way a real page would.
//!
//! Native functions use `NativeFunction::from_copy_closure`, which
//! rules out capturing state; storage and alert capture go through a
//! thread-local side channel instead. Script execution is
//! single-threaded, so this is safe.

use std::cell::RefCell;

use anyhow::anyhow;
use boa_engine::object::ObjectInitializer;
use boa_engine::property::Attribute;
use boa_engine::{Context, JsResult, JsString, JsValue, NativeFunction, Source, js_string};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;

use crate::host::HostPage;
use crate::log;

use super::executor::{ExecutionError, Executor};

thread_local! {
    /// Browser-style local storage. Lives outside the context so it
    /// survives a page reload, like the real thing.
    static STORAGE: RefCell<FxHashMap<String, String>> = RefCell::new(FxHashMap::default());
    /// Alert messages raised during the current run.
    static ALERTS: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

fn take_alerts() -> Vec<String> {
    ALERTS.with(|a| a.take())
}

/// Evaluation outcome produced by the driver, decoded from JSON.
#[derive(Deserialize)]
struct Outcome {
    #[serde(default)]
    ok: Option<Value>,
    #[serde(default)]
    err: Option<Failure>,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Deserialize)]
struct Failure {
    #[serde(default)]
    mesg: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    caus: Option<Value>,
}

/// Boa-backed [`Executor`].
pub struct JsEngine {
    context: Context,
}

impl JsEngine {
    pub fn new() -> anyhow::Result<Self> {
        let mut context = Context::default();
        register_globals(&mut context)
            .map_err(|e| anyhow!("script engine setup failed: {e}"))?;
        Ok(Self { context })
    }

    fn eval(&mut self, source: &str) -> JsResult<JsValue> {
        self.context.eval(Source::from_bytes(source.as_bytes()))
    }
}

impl Executor for JsEngine {
    fn run(&mut self, page: &mut dyn HostPage, code: &str) -> Result<Value, ExecutionError> {
        let _ = take_alerts();

        // The title is plain data inside the context; reseed it from
        // the page so reads observe outside changes.
        let seed = format!("document.title = {};", quote(page.title()));
        self.eval(&seed).map_err(|e| error_from_js(&e))?;

        let driver = driver_source(code);
        let result = self.eval(&driver);

        for message in take_alerts() {
            log!("script"; "alert: {message}");
        }

        let value = result.map_err(|e| error_from_js(&e))?;
        let text = value
            .to_string(&mut self.context)
            .map_err(|e| error_from_js(&e))?
            .to_std_string_escaped();
        let outcome: Outcome = serde_json::from_str(&text)
            .map_err(|e| ExecutionError::new(format!("malformed evaluation result: {e}")))?;

        if let Some(title) = outcome.title
            && title != page.title()
        {
            crate::debug!("script"; "title set to {title}");
            page.set_title(&title);
        }

        match outcome.err {
            Some(f) => Err(ExecutionError {
                message: f.mesg,
                name: f.name,
                cause: f.caus,
            }),
            None => Ok(outcome.ok.unwrap_or(Value::Null)),
        }
    }

    /// Rebuild the context. User globals vanish, storage stays.
    fn reset(&mut self) -> anyhow::Result<()> {
        *self = Self::new()?;
        Ok(())
    }
}

/// Wrap `code` the way `Function(code)()` would: a function body where
/// a top-level `return` produces the captured value. The driver turns
/// the run into a JSON report so undefined results, thrown errors and
/// unserializable values all come back on one channel.
fn driver_source(code: &str) -> String {
    format!(
        r#"(function () {{
    var __out = {{}};
    try {{
        var __r = (function () {{
{code}
        }})();
        __out.ok = (__r === undefined) ? null : __r;
    }} catch (e) {{
        __out.err = {{
            mesg: (e && e.message !== undefined) ? String(e.message) : String(e),
            name: (e && e.name) ? String(e.name) : null,
            caus: (e && e.cause !== undefined) ? e.cause : null
        }};
    }}
    __out.title = String(document.title);
    try {{
        return JSON.stringify(__out);
    }} catch (e2) {{
        return JSON.stringify({{
            err: {{
                mesg: (e2 && e2.message !== undefined) ? String(e2.message) : String(e2),
                name: (e2 && e2.name) ? String(e2.name) : null,
                caus: null
            }},
            title: String(document.title)
        }});
    }}
}})()"#
    )
}

/// Quote a host string as a JS string literal.
fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Map an engine-level error (syntax errors and such) to the failure
/// shape. Boa renders native errors as `Name: message`; recover the
/// name when the prefix looks like one.
fn error_from_js(e: &boa_engine::JsError) -> ExecutionError {
    let text = format!("{e}");
    match text.split_once(": ") {
        Some((head, rest))
            if head.ends_with("Error") && head.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ExecutionError {
                message: rest.to_string(),
                name: Some(head.to_string()),
                cause: None,
            }
        }
        _ => ExecutionError::new(text),
    }
}

fn register_globals(context: &mut Context) -> JsResult<()> {
    register_storage(context)?;
    register_alert(context)?;
    register_document(context)?;
    register_window(context)?;

    // Wire the window facade and its self-reference. The cycle matters:
    // returning `window` from a script must fail serialization the way
    // a browser would, not silently flatten.
    context.eval(Source::from_bytes(
        concat!(
            "window.window = window;",
            "window.document = document;",
            "window.localStorage = localStorage;",
            "window.alert = alert;",
        )
        .as_bytes(),
    ))?;
    Ok(())
}

fn register_storage(context: &mut Context) -> JsResult<()> {
    let get_item_fn = NativeFunction::from_copy_closure(|_this, args, ctx| {
        let key = args
            .first()
            .map(|v| v.to_string(ctx))
            .transpose()?
            .map(|s| s.to_std_string_escaped())
            .unwrap_or_default();
        let value = STORAGE.with(|s| s.borrow().get(&key).cloned());
        Ok(match value {
            Some(v) => JsValue::from(JsString::from(v.as_str())),
            None => JsValue::null(),
        })
    });

    let set_item_fn = NativeFunction::from_copy_closure(|_this, args, ctx| {
        let key = args
            .first()
            .map(|v| v.to_string(ctx))
            .transpose()?
            .map(|s| s.to_std_string_escaped())
            .unwrap_or_default();
        let value = args
            .get(1)
            .map(|v| v.to_string(ctx))
            .transpose()?
            .map(|s| s.to_std_string_escaped())
            .unwrap_or_default();
        STORAGE.with(|s| s.borrow_mut().insert(key, value));
        Ok(JsValue::undefined())
    });

    let remove_item_fn = NativeFunction::from_copy_closure(|_this, args, ctx| {
        let key = args
            .first()
            .map(|v| v.to_string(ctx))
            .transpose()?
            .map(|s| s.to_std_string_escaped())
            .unwrap_or_default();
        STORAGE.with(|s| s.borrow_mut().remove(&key));
        Ok(JsValue::undefined())
    });

    let clear_fn = NativeFunction::from_copy_closure(|_this, _args, _ctx| {
        STORAGE.with(|s| s.borrow_mut().clear());
        Ok(JsValue::undefined())
    });

    let storage = ObjectInitializer::new(context)
        .function(get_item_fn, js_string!("getItem"), 1)
        .function(set_item_fn, js_string!("setItem"), 2)
        .function(remove_item_fn, js_string!("removeItem"), 1)
        .function(clear_fn, js_string!("clear"), 0)
        .build();

    context.register_global_property(js_string!("localStorage"), storage, Attribute::all())
}

fn register_alert(context: &mut Context) -> JsResult<()> {
    let alert_fn = NativeFunction::from_copy_closure(|_this, args, ctx| {
        let msg = args
            .first()
            .map(|v| v.to_string(ctx))
            .transpose()?
            .map(|s| s.to_std_string_escaped())
            .unwrap_or_default();
        ALERTS.with(|a| a.borrow_mut().push(msg));
        Ok(JsValue::undefined())
    });

    context.register_global_property(
        js_string!("alert"),
        alert_fn.to_js_function(context.realm()),
        Attribute::all(),
    )
}

fn register_document(context: &mut Context) -> JsResult<()> {
    let document = ObjectInitializer::new(context)
        .property(js_string!("title"), js_string!(""), Attribute::all())
        .build();
    context.register_global_property(js_string!("document"), document, Attribute::all())
}

fn register_window(context: &mut Context) -> JsResult<()> {
    let window = ObjectInitializer::new(context).build();
    context.register_global_property(js_string!("window"), window, Attribute::all())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryPage;
    use serde_json::json;

    fn setup() -> (MemoryPage, JsEngine) {
        (MemoryPage::new("root", "home"), JsEngine::new().unwrap())
    }

    #[test]
    fn test_returned_value_is_captured() {
        let (mut page, mut engine) = setup();
        assert_eq!(engine.run(&mut page, "return 1 + 1").unwrap(), json!(2));
        assert_eq!(
            engine.run(&mut page, "return 'hi' + '!'").unwrap(),
            json!("hi!")
        );
        assert_eq!(
            engine
                .run(&mut page, "return {a: 1, b: [true, null]}")
                .unwrap(),
            json!({"a": 1, "b": [true, null]})
        );
    }

    #[test]
    fn test_no_value_reported_as_null() {
        let (mut page, mut engine) = setup();
        assert_eq!(engine.run(&mut page, "var x = 1;").unwrap(), Value::Null);
        assert_eq!(
            engine.run(&mut page, "return undefined").unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_thrown_error_reported() {
        let (mut page, mut engine) = setup();
        let err = engine
            .run(&mut page, "throw new Error('boom')")
            .unwrap_err();
        assert_eq!(err.message, "boom");
        assert_eq!(err.name.as_deref(), Some("Error"));
        assert!(err.cause.is_none());
    }

    #[test]
    fn test_error_cause_carried() {
        let (mut page, mut engine) = setup();
        let err = engine
            .run(
                &mut page,
                "var e = new Error('outer'); e.cause = 'inner'; throw e;",
            )
            .unwrap_err();
        assert_eq!(err.message, "outer");
        assert_eq!(err.cause, Some(json!("inner")));
    }

    #[test]
    fn test_reference_error_name() {
        let (mut page, mut engine) = setup();
        let err = engine.run(&mut page, "return missingVar").unwrap_err();
        assert_eq!(err.name.as_deref(), Some("ReferenceError"));
        assert!(err.message.contains("missingVar"));
    }

    #[test]
    fn test_unparsable_code_fails() {
        let (mut page, mut engine) = setup();
        assert!(engine.run(&mut page, "return {{{").is_err());
    }

    #[test]
    fn test_thrown_string_uses_its_text() {
        let (mut page, mut engine) = setup();
        let err = engine.run(&mut page, "throw 'plain failure'").unwrap_err();
        assert_eq!(err.message, "plain failure");
        assert!(err.name.is_none());
    }

    #[test]
    fn test_local_storage_persists_across_runs() {
        let (mut page, mut engine) = setup();
        engine
            .run(&mut page, "window.localStorage.setItem('color', 'teal')")
            .unwrap();
        assert_eq!(
            engine
                .run(&mut page, "return window.localStorage.getItem('color')")
                .unwrap(),
            json!("teal")
        );
        assert_eq!(
            engine
                .run(&mut page, "return window.localStorage.getItem('missing')")
                .unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_document_title_read_and_write() {
        let (mut page, mut engine) = setup();
        assert_eq!(
            engine.run(&mut page, "return document.title").unwrap(),
            json!("home")
        );

        engine
            .run(&mut page, "document.title = 'renamed'")
            .unwrap();
        assert_eq!(page.title(), "renamed");
        assert_eq!(
            engine.run(&mut page, "return document.title").unwrap(),
            json!("renamed")
        );
    }

    #[test]
    fn test_alert_does_not_disturb_result() {
        let (mut page, mut engine) = setup();
        assert_eq!(
            engine
                .run(&mut page, "window.alert('attention'); return true")
                .unwrap(),
            json!(true)
        );
    }

    #[test]
    fn test_globals_persist_between_runs() {
        let (mut page, mut engine) = setup();
        engine.run(&mut page, "window.counter = 41;").unwrap();
        assert_eq!(
            engine
                .run(&mut page, "return window.counter + 1")
                .unwrap(),
            json!(42)
        );
    }

    #[test]
    fn test_reset_clears_globals_keeps_storage() {
        let (mut page, mut engine) = setup();
        engine
            .run(
                &mut page,
                "window.kept = 1; window.localStorage.setItem('stays', 'yes')",
            )
            .unwrap();

        engine.reset().unwrap();

        assert_eq!(
            engine
                .run(&mut page, "return window.kept === undefined")
                .unwrap(),
            json!(true)
        );
        assert_eq!(
            engine
                .run(&mut page, "return window.localStorage.getItem('stays')")
                .unwrap(),
            json!("yes")
        );
    }

    #[test]
    fn test_cyclic_value_fails_instead_of_hanging() {
        let (mut page, mut engine) = setup();
        assert!(engine.run(&mut page, "return window").is_err());
    }
}
