use proc_macro::TokenStream as TokenStream1;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{parse_macro_input, Ident, ImplItemFn};

/// This macro is added before a method of `Trainer` struct in the impl block.
/// Use this macro to first check if the current episode phase is exactly the
/// phase in the attribute.
///
/// For example, `#[allowed_phase(PlayerDecision)]` will make a method first
/// check if the current phase is `PlayerDecision`. If not, the method will
/// return `Error::InvalidPhase`. The method must return `Result<_, Error>`.
#[proc_macro_attribute]
pub fn allowed_phase(attr: TokenStream1, item: TokenStream1) -> TokenStream1 {
    let phase = parse_macro_input!(attr as Ident);
    let mut ast = parse_macro_input!(item as ImplItemFn);

    let method_name = ast.sig.ident.to_string();
    let early_return = phase_guard(&phase, &method_name);
    let early_return: syn::Stmt = match syn::parse2(early_return) {
        Ok(stmt) => stmt,
        Err(err) => return err.to_compile_error().into(),
    };
    ast.block.stmts.insert(0, early_return);
    ast.into_token_stream().into()
}

fn phase_guard(phase: &Ident, method_name: &str) -> TokenStream2 {
    quote! {
        if self.current_phase != EpisodePhase::#phase {
            return Err(crate::Error::InvalidPhase {
                method: #method_name,
                expected: EpisodePhase::#phase,
                actual: self.current_phase,
            });
        }
    }
}
