//! Server bindings: the server trait and the handler constructor.

use super::ServiceContext;
use crate::printer::Printer;

pub(crate) fn generate(cx: &ServiceContext<'_>, p: &mut Printer) {
    generate_trait(cx, p);
    generate_handler(cx, p);
}

fn generate_trait(cx: &ServiceContext<'_>, p: &mut Printer) {
    let names = &cx.names;
    let rt = cx.rt;

    p.doc(&format!(
        "{} is the server API for the {} service.",
        names.server_trait, cx.service.qualified_name
    ));
    p.line("///");
    p.doc(&format!(
        "Implementations must embed {shim} and return it from {marker}. Methods \
         left unimplemented, including methods added to the service later, are \
         answered by {shim} with an unimplemented error.",
        shim = names.shim,
        marker = names.marker,
    ));
    cx.service_comments(p);
    cx.service_deprecation(p);
    p.line(format!("#[{rt}::async_trait]"));
    p.annotate(names.server_trait.as_str(), &cx.service.location);
    p.open(format!(
        "pub trait {}: ::std::marker::Send + ::std::marker::Sync + 'static",
        names.server_trait
    ));
    for method in &cx.methods {
        let ident = cx.method_ident(method);
        cx.method_docs(method, p);
        p.annotate(
            format!("{}.{ident}", names.server_trait),
            &method.location,
        );
        p.open(format!(
            "async fn {ident}(&self, ctx: {rt}::Context, req: {}) -> {}",
            cx.input_type(method),
            cx.result_type(method)
        ));
        p.line(format!(
            "<{shim} as {server}>::{ident}(self.{marker}(), ctx, req).await",
            shim = names.shim,
            server = names.server_trait,
            marker = names.marker,
        ));
        p.close("");
        p.blank();
    }
    p.doc(&format!(
        "Returns the embedded {}; implemented by returning the embedded field.",
        names.shim
    ));
    p.line("#[allow(non_snake_case)]");
    p.line(format!("fn {}(&self) -> &{};", names.marker, names.shim));
    p.close("");
    p.blank();
}

fn generate_handler(cx: &ServiceContext<'_>, p: &mut Printer) {
    let names = &cx.names;
    let rt = cx.rt;

    p.doc(&format!(
        "{} builds a router from the service implementation. It returns the path \
         on which to mount the router and the router itself.",
        names.handler_ctor
    ));
    p.line("///");
    p.doc("By default, handlers use the binary Protobuf codec.");
    cx.service_deprecation(p);
    p.line("#[allow(non_snake_case, unused_variables, unused_mut)]");
    p.open(format!(
        "pub fn {}<S: {}>(svc: S, opts: &[{rt}::HandlerOption]) -> (::std::string::String, {rt}::Router)",
        names.handler_ctor, names.server_trait
    ));
    p.line("let svc = ::std::sync::Arc::new(svc);");
    p.line(format!("let mut mux = {rt}::Router::new();"));
    for method in &cx.methods {
        generate_route(cx, method, p);
    }
    p.line(format!(
        "(::std::string::String::from(\"{}\"), mux)",
        cx.service.mount_path()
    ));
    p.close("");
    p.blank();
}

fn generate_route(cx: &ServiceContext<'_>, method: &crate::descriptor::MethodDescriptor, p: &mut Printer) {
    let rt = cx.rt;
    let ident = cx.method_ident(method);
    let input = cx.input_type(method);
    let handler_var = format!("{}_handler", ident.trim_start_matches("r#"));

    p.open(format!("let {handler_var} ="));
    p.line("let svc = ::std::sync::Arc::clone(&svc);");
    p.line(format!("{rt}::Handler::new("));
    p.indent();
    cx.identity_args(method, p);
    p.open(format!(
        "{rt}::UnaryHandler::new(move |ctx: {rt}::Context, req: ::std::boxed::Box<dyn {rt}::AnyMessage>|"
    ));
    p.line("let svc = ::std::sync::Arc::clone(&svc);");
    p.open("async move");
    p.open(format!("let typed = match req.downcast::<{input}>()"));
    p.line("::std::result::Result::Ok(typed) => typed,");
    p.open("::std::result::Result::Err(actual) =>");
    p.line(format!("return ::std::result::Result::Err({rt}::Error::new("));
    p.indent();
    p.line(format!("{rt}::Code::Internal,"));
    p.line("::std::format!(");
    p.indent();
    p.line("\"error in generated code: expected req to be a {}, got a {}\",");
    p.line(format!("::std::any::type_name::<{input}>(),"));
    p.line("actual,");
    p.dedent();
    p.line("),");
    p.dedent();
    p.line("));");
    p.close("");
    p.close(";");
    p.line(format!(
        "<S as {}>::{ident}(&*svc, ctx, *typed).await.map(|res| ::std::boxed::Box::new(res) as ::std::boxed::Box<dyn {rt}::AnyMessage>)",
        cx.names.server_trait
    ));
    p.close("");
    p.close("),");
    p.line("opts,");
    p.dedent();
    p.line(")");
    p.close(";");
    p.line(format!(
        "mux.handle::<{input}>(\"/{}\", {handler_var});",
        cx.service.method_path(method)
    ));
}
