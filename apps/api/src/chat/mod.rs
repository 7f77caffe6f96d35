// Career assistant: builds an analysis-grounded prompt and relays it to the LLM client.
pub mod handlers;
pub mod models;
pub mod prompts;
