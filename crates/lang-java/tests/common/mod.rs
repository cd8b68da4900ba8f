use jsniscope_java::{
    JavaSourceParser, JsniValidator, ProblemSeverities, StaticTypeIndex, ValidationResult,
};
use std::sync::Once;

static INIT: Once = Once::new();

#[allow(dead_code)]
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("jsniscope_java=debug")
            .try_init();
    });
}

/// A small GWT-flavoured type model shared by the integration tests.
#[allow(dead_code)]
pub fn widget_index() -> StaticTypeIndex {
    StaticTypeIndex::new()
        .add_class("java.lang.Object", None)
        .add_method("java.lang.Object", "toString", &[])
        .add_method("java.lang.Object", "equals", &["java.lang.Object"])
        .add_class("java.lang.String", None)
        .add_class("com.google.gwt.core.client.JavaScriptObject", None)
        .add_interface("com.example.client.HasHandlers", &[])
        .add_method("com.example.client.HasHandlers", "fireEvent", &["com.example.client.Event"])
        .add_class("com.example.client.Event", None)
        .add_class("com.example.client.Widget", None)
        .implements("com.example.client.Widget", "com.example.client.HasHandlers")
        .add_constructor("com.example.client.Widget", &[])
        .add_constructor("com.example.client.Widget", &["java.lang.String"])
        .add_field("com.example.client.Widget", "count", "int")
        .add_method("com.example.client.Widget", "onClick", &["int"])
        .add_method("com.example.client.Widget", "onClick", &["int", "java.lang.String"])
        .add_method("com.example.client.Widget", "setItems", &["java.lang.String[]"])
        .add_class("com.example.client.Widget.Handle", None)
        .add_field("com.example.client.Widget.Handle", "id", "long")
        .add_class("com.example.client.Button", Some("com.example.client.Widget"))
}

#[allow(dead_code)]
pub fn validate_source(source: &str, index: &StaticTypeIndex) -> ValidationResult {
    validate_with(source, index, &ProblemSeverities::new())
}

#[allow(dead_code)]
pub fn validate_with(
    source: &str,
    index: &StaticTypeIndex,
    severities: &ProblemSeverities,
) -> ValidationResult {
    let unit = JavaSourceParser::new()
        .parse_unit("Test.java", source)
        .expect("source should parse");
    JsniValidator::new(index, severities)
        .validate_unit(&unit)
        .expect("static index never fails")
}

/// Wrap a JSNI body in a native method of `com.example.client.Widget`.
#[allow(dead_code)]
pub fn widget_source(body: &str) -> String {
    format!(
        "package com.example.client;\n\n\
         import com.google.gwt.core.client.JavaScriptObject;\n\n\
         public class Widget {{\n\
         \x20   native void run(JavaScriptObject elem) /*-{{\n{}\n    }}-*/;\n\
         }}\n",
        body
    )
}
