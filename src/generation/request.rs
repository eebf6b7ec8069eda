use serde::Serialize;

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct UserContent<'a> {
    role: &'a str,
    parts: Vec<TextPart<'a>>,
}

/// Body of `POST /models/{model}:generateContent` for a single user turn.
#[derive(Serialize)]
pub struct GenerateContentRequest<'a> {
    contents: Vec<UserContent<'a>>,
}

impl<'a> GenerateContentRequest<'a> {
    pub fn single_turn(message: &'a str) -> Self {
        Self {
            contents: vec![UserContent {
                role: "user",
                parts: vec![TextPart { text: message }],
            }],
        }
    }
}
