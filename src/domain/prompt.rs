//! Structured prompt construction for grounded answering

use crate::domain::chunk::Chunk;
use crate::domain::message::Message;
use crate::domain::schema::SchemaDescriptor;

/// The literal reply the model is told to use when the context does not
/// support a confident answer.
pub const FALLBACK_ANSWER: &str = "Cannot form an answer with the present knowledge base";

const ASSISTANT_ROLE: &str = "You are a helpful assistant that retrieves relevant information for \
     the user query based on the context given.";

/// Build the message sequence for one query, deterministically and in fixed
/// order: assistant role, grounding instruction, one `<CONTEXT>` message per
/// chunk (caller-supplied order, no truncation), the schema instruction and
/// the serialized schema, and finally the unmodified user query.
pub fn build_prompt(query: &str, chunks: &[Chunk], schema: &SchemaDescriptor) -> Vec<Message> {
    let mut messages = Vec::with_capacity(chunks.len() + 5);

    messages.push(Message::system(ASSISTANT_ROLE));
    add_context(&mut messages, chunks);
    add_response_schema(&mut messages, schema);
    messages.push(Message::user(query));

    messages
}

fn add_context(messages: &mut Vec<Message>, chunks: &[Chunk]) {
    messages.push(Message::system(format!(
        "Below contains the context for the question. Answer the query only based on the context. \
         The contexts are given inside <CONTEXT> tag. If you are not confident response should be \
         `{FALLBACK_ANSWER}`. You should not make up an answer"
    )));

    for chunk in chunks {
        messages.push(Message::system(format!(
            "<CONTEXT>{}</CONTEXT>",
            chunk.text()
        )));
    }
}

fn add_response_schema(messages: &mut Vec<Message>, schema: &SchemaDescriptor) {
    messages.push(Message::system(
        "The response should only be in the following json format",
    ));
    messages.push(Message::system(schema.to_json().to_string()));
}
