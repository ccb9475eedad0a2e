//! Utility macros for the compiler.
//!
//! This module defines helper macros used throughout the front end:
//!
//! - `MK_SIBLINGS!` - Links tree nodes into a sibling list
//!
//! Parsers and tests build declaration, statement and argument lists with it.

/// Links tree nodes into a sibling list and returns its head.
///
/// # Arguments
///
/// * `$head` - The first node of the list
/// * `$rest` - The nodes that follow, in order
///
/// # Example
///
/// ```ignore
/// let args = MK_SIBLINGS!(identifier(3, "a"), identifier(3, "b"));
/// ```
#[macro_export]
macro_rules! MK_SIBLINGS {
    ($head:expr $(, $rest:expr)* $(,)?) => {{
        #[allow(unused_mut)]
        let mut head: $crate::ast::ast::TreeNode = $head;
        $( head.append_sibling($rest); )*
        head
    }};
}
