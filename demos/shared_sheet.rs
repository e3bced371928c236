//! Shared stylesheet demo.
//!
//! Mounts three consumers of the same button sheet plus a themed page sheet
//! that follows a signal, then prints the document head after each step.
//!
//! Run with: RUST_LOG=spark_style=debug cargo run --example shared_sheet

use std::rc::Rc;

use spark_signals::signal;
use spark_style::{
    provide_style_context, style, use_style, Attributes, Cleanup, Document, InjectOptions,
    StyleContext, StyleError, StyleOptions, StyleOptionsProp, StyleProps, StyleSheet,
};

fn print_head(step: &str, document: &Document) {
    let head = document.head();
    println!("-- {step} <{}>", head.tag());
    for element in document.style_elements(&head) {
        let selector = element.selector.as_deref().unwrap_or("(global)");
        println!("   {} {selector}: {}", element.sheet_id, element.css);
    }
}

fn button(label: &'static str) -> Result<Cleanup, StyleError> {
    let sheet = StyleSheet::local(".button", "padding: 4px 8px; border-radius: 4px");
    style(StyleProps::new(sheet).child(move || -> Cleanup {
        println!("   render button {label}");
        Box::new(move || println!("   unmount button {label}"))
    }))
}

fn main() -> Result<(), StyleError> {
    env_logger::init();

    let document = Rc::new(Document::new());
    provide_style_context(StyleContext::new(document.clone()));

    let dark = signal(false);
    let dark_for_page = dark.clone();
    let page = use_style(StyleOptionsProp::getter(move || {
        let css = if dark_for_page.get() {
            "body { background: #111; color: #eee }"
        } else {
            "body { background: #fff; color: #111 }"
        };
        StyleOptions::new(StyleSheet::global(css)).inject_options(
            InjectOptions::new().with_attributes(Attributes::new().with("data-theme", "page")),
        )
    }))?;
    print_head("page mounted", &document);

    let ok = button("ok")?;
    let cancel = button("cancel")?;
    let help = button("help")?;
    print_head("three buttons mounted", &document);

    dark.set(true);
    print_head("dark theme", &document);

    ok();
    cancel();
    print_head("two buttons unmounted", &document);

    help();
    page();
    print_head("everything unmounted", &document);

    println!("-- {} host calls", document.operations().len());
    Ok(())
}
