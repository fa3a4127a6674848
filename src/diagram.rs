pub mod repair;

pub use repair::{normalize, repair, repair_line, strip_code_fence};

use serde_json::Value;

const INTERPRET_PROMPT: &str = "\
You are a system that interprets OpenAPI specifications and turns them into human-readable diagrams.
Return the interpretation as a Mermaid diagram, specification version 11.0.2. Identify the distinct users of the application and name them descriptively, for example End_User, Admin or System.
Return only the diagram, no other information.
Ignore controller names: the nodes of the graph are the endpoint paths and the arrows linking them are the HTTP verbs they support.
Make sure there are no indentation errors in the diagram.
Do not create subgraphs or any other complex structure, only users connecting to their endpoints or series of endpoints.
Always append a finishing / to the end of each endpoint so the diagram renders, and replace curly braces on endpoints with an apostrophe.
Use the following format for each connection: User-->|HTTP_METHOD|/endpoint/

Start the diagram with the following line:
graph TD

This marks it as a top-down flowchart.

This is the specification:
{spec}
";

/// Render the interpretation prompt with the full specification embedded
pub fn interpret_prompt(spec: &Value) -> String {
    INTERPRET_PROMPT.replace("{spec}", &spec.to_string())
}
