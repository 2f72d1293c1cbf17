//! Chat command

use super::{Config, config::Endpoint};
use anyhow::Result;
use clap::{Args, ValueEnum};
use futures_util::StreamExt;
use model::{Client, HttpProvider, OAuth, StaticToken};
use pcore::{Message, Model, Protocol};
use runtime::{CancellationToken, Runtime, Session};
use std::io::Write;

/// Chat command arguments
#[derive(Debug, Args)]
pub struct ChatCmd {
    /// Override the configured call convention
    #[arg(short, long)]
    pub protocol: Option<ProtocolArg>,

    /// Skip TLS certificate validation
    #[arg(long)]
    pub insecure: bool,

    /// The message to send
    pub message: String,
}

/// Call conventions selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProtocolArg {
    /// Schemas in the `functions` field
    Structured,
    /// Tool listing in the system prompt
    Inline,
}

impl From<ProtocolArg> for Protocol {
    fn from(arg: ProtocolArg) -> Self {
        match arg {
            ProtocolArg::Structured => Protocol::Structured,
            ProtocolArg::Inline => Protocol::Inline,
        }
    }
}

impl ChatCmd {
    /// Run the chat command
    pub async fn run(&self, stream: bool) -> Result<()> {
        let mut config = Config::load()?;
        if let Some(protocol) = self.protocol {
            config.general.protocol = protocol.into();
        }

        let client = Client::builder()
            .danger_accept_invalid_certs(self.insecure)
            .build()?;
        let Endpoint {
            chat,
            oauth,
            scope,
            credential,
        } = &config.endpoint;
        let provider = match oauth {
            Some(url) => {
                let auth = OAuth::new(url.as_str(), scope.as_str());
                HttpProvider::connect(client, &auth, credential, chat).await?
            }
            None => HttpProvider::connect(client, &StaticToken, credential, chat).await?,
        };

        let mut runtime = Runtime::new(config.general.clone(), provider);
        crate::tools::register(&mut runtime);
        let mut session = runtime.session();

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                trigger.cancel();
            }
        });

        let message = Message::user(&self.message);
        Self::send(&runtime, &mut session, message, stream, cancel).await
    }

    async fn send<M: Model>(
        runtime: &Runtime<M>,
        session: &mut Session,
        message: Message,
        stream: bool,
        cancel: CancellationToken,
    ) -> Result<()> {
        if stream {
            let mut stream = std::pin::pin!(runtime.stream(session, message, cancel));
            let mut stdout = std::io::stdout();
            while let Some(chunk) = stream.next().await {
                print!("{}", chunk?);
                stdout.flush()?;
            }
            println!();
        } else {
            let reply = runtime.send(session, message, &cancel).await?;
            println!("{}", reply.text);
            tracing::debug!(
                "tokens: {} prompt, {} completion, {} calls",
                reply.usage.prompt_tokens,
                reply.usage.completion_tokens,
                reply.calls
            );
        }
        Ok(())
    }
}
