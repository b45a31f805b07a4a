// src/macros.rs

/// String shorthand.
/// `s!()` is an empty `String`, `s!(x)` is `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Concatenate string-ish pieces into a fresh `String`.
/// Used for column names built from several parameters.
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

/// Space-separated column name from displayable parts: `name!(year, offset, label)`.
#[macro_export]
macro_rules! name {
    ($($part:expr),+ $(,)?) => {{
        let parts: ::std::vec::Vec<::std::string::String> = vec![$($part.to_string()),+];
        parts.join(" ")
    }};
}
