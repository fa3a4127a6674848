use clap::Parser;

#[derive(Debug, Parser)]
#[clap(
    name = "fences",
    about = "Interpret an OpenAPI specification into a role/endpoint diagram and proxy requests against it",
    version
)]
pub struct Args {
    /// URL of the OpenAPI specification to interpret
    #[clap(short, long, value_name = "URL")]
    pub spec_url: String,

    /// Text-generation backend ("openai" or "anthropic")
    #[clap(short, long, value_name = "BACKEND", default_value = "anthropic")]
    pub provider: String,

    /// API credential for the selected backend
    #[clap(short, long, value_name = "KEY")]
    pub api_key: String,

    /// Port for the local HTTP front-end
    #[clap(long, value_name = "PORT", default_value_t = 5000)]
    pub port: u16,
}
