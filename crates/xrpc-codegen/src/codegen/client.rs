//! Client bindings: the client trait, its private implementation and constructor.

use super::ServiceContext;
use crate::printer::Printer;

pub(crate) fn generate(cx: &ServiceContext<'_>, p: &mut Printer) {
    generate_trait(cx, p);
    generate_struct(cx, p);
    generate_constructor(cx, p);
    generate_impl(cx, p);
}

fn method_signature(cx: &ServiceContext<'_>, method: &crate::descriptor::MethodDescriptor) -> String {
    format!(
        "async fn {}(&self, ctx: {rt}::Context, req: &{}, opts: &[{rt}::CallOption]) -> {}",
        cx.method_ident(method),
        cx.input_type(method),
        cx.result_type(method),
        rt = cx.rt,
    )
}

fn generate_trait(cx: &ServiceContext<'_>, p: &mut Printer) {
    let names = &cx.names;
    let rt = cx.rt;

    p.doc(&format!(
        "{} is a client for the {} service.",
        names.client_trait, cx.service.qualified_name
    ));
    cx.service_comments(p);
    cx.service_deprecation(p);
    p.line(format!("#[{rt}::async_trait]"));
    p.annotate(names.client_trait.as_str(), &cx.service.location);
    p.open(format!(
        "pub trait {}: ::std::marker::Send + ::std::marker::Sync",
        names.client_trait
    ));
    for method in &cx.methods {
        cx.method_docs(method, p);
        p.annotate(
            format!("{}.{}", names.client_trait, cx.method_ident(method)),
            &method.location,
        );
        p.line(format!("{};", method_signature(cx, method)));
    }
    p.close("");
    p.blank();
}

fn generate_struct(cx: &ServiceContext<'_>, p: &mut Printer) {
    let names = &cx.names;

    p.doc(&format!(
        "{} implements {}.",
        names.client_struct, names.client_trait
    ));
    p.line("#[allow(non_camel_case_types)]");
    p.line("#[derive(::std::fmt::Debug, ::std::clone::Clone)]");
    p.open(format!("struct {}", names.client_struct));
    for method in &cx.methods {
        p.line(format!("{}: {}::Client,", cx.method_ident(method), cx.rt));
    }
    p.close("");
    p.blank();
}

fn generate_constructor(cx: &ServiceContext<'_>, p: &mut Printer) {
    let names = &cx.names;
    let rt = cx.rt;

    p.doc(&format!(
        "{} constructs a client for the {} service. By default, it uses the binary \
         Protobuf codec. Call options passed here apply to every call made with the client.",
        names.client_ctor, cx.service.qualified_name
    ));
    p.line("///");
    p.doc(
        "The URL supplied here should be the base URL for the server (for example, \
         https://api.acme.com or https://acme.com/rpc).",
    );
    cx.service_deprecation(p);
    p.line("#[allow(non_snake_case, unused_variables)]");
    p.open(format!(
        "pub fn {}(base_url: &str, doer: ::std::sync::Arc<dyn {rt}::Doer>, opts: &[{rt}::CallOption]) -> impl {} + use<>",
        names.client_ctor, names.client_trait
    ));
    p.line("let base_url = base_url.trim_end_matches('/');");
    p.open(names.client_struct.as_str());
    for method in &cx.methods {
        p.line(format!("{}: {rt}::Client::new(", cx.method_ident(method)));
        p.indent();
        p.line("::std::sync::Arc::clone(&doer),");
        p.line(format!(
            "::std::format!(\"{{}}/{}\", base_url), // complete URL of the method",
            cx.service.method_path(method)
        ));
        cx.identity_args(method, p);
        p.line("opts,");
        p.dedent();
        p.line("),");
    }
    p.close("");
    p.close("");
    p.blank();
}

fn generate_impl(cx: &ServiceContext<'_>, p: &mut Printer) {
    let names = &cx.names;

    p.line(format!("#[{}::async_trait]", cx.rt));
    p.open(format!(
        "impl {} for {}",
        names.client_trait, names.client_struct
    ));
    for (i, method) in cx.methods.iter().enumerate() {
        if i > 0 {
            p.blank();
        }
        let ident = cx.method_ident(method);
        p.doc(&format!(
            "{ident} calls {}. Call options passed here apply only to this call.",
            method.qualified_name
        ));
        if method.deprecated {
            p.line("///");
            p.doc(super::DEPRECATION_NOTICE);
        }
        p.open(method_signature(cx, method));
        p.line(format!(
            "let mut res = <{} as ::core::default::Default>::default();",
            cx.output_type(method)
        ));
        p.line(format!("self.{ident}.call(ctx, req, &mut res, opts).await?;"));
        p.line("::std::result::Result::Ok(res)");
        p.close("");
    }
    p.close("");
    p.blank();
}
