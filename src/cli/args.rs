use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "meetd")]
#[command(about = "Meeting agent service for Hire-Genix Meet", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Print version information
    Version,
    /// Mint call credentials from the running service
    Credentials,
    /// Attach an AI agent to a call
    Agent(AgentCliArgs),
}

#[derive(ClapArgs, Debug)]
pub struct AgentCliArgs {
    /// Id of the call to attach the agent to
    pub call_id: String,
    /// Call type
    #[arg(long, default_value = "default")]
    pub call_type: String,
    /// Attach a group-discussion agent instead of the interviewer
    #[arg(long)]
    pub group: bool,
    /// User id for the group-discussion agent
    #[arg(long)]
    pub agent_id: Option<String>,
}
