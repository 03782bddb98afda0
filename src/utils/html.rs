use ammonia;

/// Strip unsafe markup from user-submitted text and trim surrounding whitespace.
///
/// Whitelist-based (ammonia): harmless tags like <b> or <p> survive, while
/// <script>, <iframe> and event-handler attributes are removed together with
/// script bodies. Comment and article bodies are stored in this form.
pub fn sanitize_user_text(input: &str) -> String {
    ammonia::clean(input.trim()).trim().to_string()
}
