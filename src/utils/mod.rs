pub mod html;
pub mod jwt;
pub mod sensitive_words;
