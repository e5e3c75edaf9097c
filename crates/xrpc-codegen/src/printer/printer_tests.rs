#![allow(non_snake_case)]

use super::*;

fn location(path: &[i32]) -> SourceLocation {
    SourceLocation {
        source_file: "greeter.proto".into(),
        path: path.to_vec(),
    }
}

#[test]
fn Printer___open_close___indents_body() {
    let mut p = Printer::new();

    p.open("pub trait Greeter");
    p.line("fn greet(&self);");
    p.close("");

    assert_eq!(p.content(), "pub trait Greeter {\n    fn greet(&self);\n}\n");
}

#[test]
fn Printer___line___empty_text_has_no_trailing_whitespace() {
    let mut p = Printer::new();

    p.indent();
    p.line("");
    p.blank();

    assert_eq!(p.content(), "\n\n");
}

#[test]
fn Printer___annotate___records_identifier_byte_range() {
    let mut p = Printer::new();
    p.line("// header");
    p.annotate("GreeterServerX", &location(&[6, 0]));

    p.open("pub trait GreeterServerX: Send");
    p.close("");
    let (content, annotations) = p.finish();

    assert_eq!(annotations.len(), 1);
    let annotation = &annotations[0];
    assert_eq!(&content[annotation.begin..annotation.end], "GreeterServerX");
    assert_eq!(annotation.symbol, "GreeterServerX");
    assert_eq!(annotation.location.path, vec![6, 0]);
}

#[test]
fn Printer___annotate___uses_method_segment_and_skips_non_matching_lines() {
    let mut p = Printer::new();
    p.annotate("GreeterClientX.greet", &location(&[6, 0, 2, 0]));

    p.line("/// greet_all and greeting");
    p.line("async fn greet(&self);");
    let (content, annotations) = p.finish();

    let annotation = &annotations[0];
    assert_eq!(&content[annotation.begin..annotation.end], "greet");
    assert!(content[..annotation.begin].ends_with("async fn "));
}

#[test]
fn Printer___annotate___matches_raw_identifiers() {
    let mut p = Printer::new();
    p.annotate("GreeterClientX.r#type", &location(&[6, 0, 2, 0]));

    p.line("async fn r#type(&self);");
    let (content, annotations) = p.finish();

    assert_eq!(&content[annotations[0].begin..annotations[0].end], "r#type");
}

#[test]
fn Printer___annotate___keyword_method_spans_name_not_keywords() {
    let mut p = Printer::new();
    p.annotate("KwClientX.r#async", &location(&[6, 0, 2, 0]));
    p.annotate("KwClientX.r#fn", &location(&[6, 0, 2, 1]));

    p.indent();
    p.line("async fn r#async(&self);");
    p.line("async fn r#fn(&self);");
    let (content, annotations) = p.finish();

    assert_eq!(annotations.len(), 2);
    for annotation in &annotations {
        assert!(content[..annotation.begin].ends_with("async fn "));
    }
    assert_eq!(&content[annotations[0].begin..annotations[0].end], "r#async");
    assert_eq!(&content[annotations[1].begin..annotations[1].end], "r#fn");
}

#[test]
fn Printer___finish___drops_unresolved_annotations() {
    let mut p = Printer::new();
    p.annotate("Missing", &location(&[6, 0]));

    p.line("struct Present;");
    let (_, annotations) = p.finish();

    assert!(annotations.is_empty());
}

#[test]
fn Printer___doc___wraps_long_text() {
    let mut p = Printer::new();
    let text = "word ".repeat(40);

    p.doc(&text);

    for line in p.content().lines() {
        assert!(line.starts_with("/// "));
        assert!(line.len() <= 80, "line too long: {line}");
    }
    assert_eq!(p.content().split_whitespace().filter(|w| *w == "word").count(), 40);
}

#[test]
fn Printer___doc_lines___keeps_breaks_and_trims_indent() {
    let mut p = Printer::new();

    p.doc_lines(" Greet says hello.\n\n     indented\n");

    assert_eq!(p.content(), "/// Greet says hello.\n///\n/// indented\n");
}

#[test]
fn Printer___doc_lines___tags_bare_code_fences_as_text() {
    let mut p = Printer::new();

    p.doc_lines(" Example:\n ```\n this is not rust\n ```\n");

    assert_eq!(
        p.content(),
        "/// Example:\n/// ```text\n/// this is not rust\n/// ```\n"
    );
}

#[test]
fn Printer___doc_lines___keeps_tagged_code_fences() {
    let mut p = Printer::new();

    p.doc_lines(" ```json\n {}\n ```\n ```\n plain\n ```\n");

    assert_eq!(
        p.content(),
        "/// ```json\n/// {}\n/// ```\n/// ```text\n/// plain\n/// ```\n"
    );
}
