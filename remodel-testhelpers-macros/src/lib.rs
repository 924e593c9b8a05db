//! Proc macros for `remodel-testhelpers`.

use unsynn::*;

unsynn! {
    struct TestFn {
        signature: Any<Cons<Except<BraceGroup>, TokenTree>>,
        body: BraceGroup,
    }
}

/// Test attribute that installs the remodel test subscriber before the test
/// body runs.
///
/// ```ignore
/// #[remodel_testhelpers::test]
/// fn builds_a_duck() {
///     // tracing output of the engine is visible here
/// }
/// ```
#[proc_macro_attribute]
pub fn test(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    if !attr.is_empty() {
        return quote::quote! {
            ::core::compile_error!("#[remodel_testhelpers::test] takes no arguments");
        }
        .into();
    }

    let item = TokenStream::from(item);
    let TestFn { signature, body } = match item.to_token_iter().parse::<TestFn>() {
        Ok(test_fn) => test_fn,
        Err(err) => {
            let message = format!("#[remodel_testhelpers::test] expects a function: {err:?}");
            return quote::quote! { ::core::compile_error!(#message); }.into();
        }
    };
    let signature = signature.to_token_stream();
    let body = body.0.stream();

    quote::quote! {
        #[::core::prelude::rust_2024::test]
        #signature {
            ::remodel_testhelpers::setup();

            #body
        }
    }
    .into()
}
