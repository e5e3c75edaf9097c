//! Forward-compatibility shim: the `Unimplemented...ServerX` type every server embeds.

use super::ServiceContext;
use crate::printer::Printer;

pub(crate) fn generate(cx: &ServiceContext<'_>, p: &mut Printer) {
    let names = &cx.names;
    let rt = cx.rt;

    p.comment("verify trait implementation");
    p.open("const _: fn() = ||");
    p.line(format!("fn assert_impl<T: {}>() {{}}", names.server_trait));
    p.line(format!("assert_impl::<{}>();", names.shim));
    p.close(";");
    p.blank();

    p.doc(&format!(
        "{} returns an unimplemented error from all methods.",
        names.shim
    ));
    p.line("#[derive(::std::fmt::Debug, ::std::clone::Clone, ::std::marker::Copy, ::std::default::Default)]");
    p.line(format!("pub struct {} {{}}", names.shim));
    p.blank();

    p.line(format!("#[{rt}::async_trait]"));
    p.open(format!("impl {} for {}", names.server_trait, names.shim));
    for method in &cx.methods {
        p.open(format!(
            "async fn {}(&self, _ctx: {rt}::Context, _req: {}) -> {}",
            cx.method_ident(method),
            cx.input_type(method),
            cx.result_type(method)
        ));
        p.line(format!(
            "::std::result::Result::Err({rt}::Error::new({rt}::Code::Unimplemented, \"method {} not implemented\"))",
            method.name
        ));
        p.close("");
        p.blank();
    }
    p.open(format!("fn {}(&self) -> &{}", names.marker, names.shim));
    p.line("self");
    p.close("");
    p.close("");
    p.blank();
}
