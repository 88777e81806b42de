use anyhow::Error;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::{client::NetworkApi, types::PostId};
use crate::errors::ValidationError;
use crate::feed::{
    controller::FeedController,
    view::{Action, ViewState},
};
use crate::terminal::TerminalPresenter;

pub type Controller<A> = FeedController<A, TerminalPresenter>;

/// Terminal client for network
#[derive(Parser)]
#[clap(version)]
pub struct Opts {
    /// Print HTML fragments instead of text
    #[clap(long)]
    pub html: bool,

    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Parser)]
pub enum SubCommand {
    Posts(ShowPosts),
    Profile(ShowProfile),
    Following(ShowFollowing),
    Post(CreatePost),
    Edit(EditPost),
    Follow(ToggleFollow),
    Browse(Browse),
}

async fn go_to_group<A: NetworkApi>(
    controller: &mut Controller<A>,
    group: usize,
) {
    if group > 1 {
        controller.dispatch(Action::GoToGroup(group)).await;
    };
}

/// Show all posts
#[derive(Parser)]
pub struct ShowPosts {
    #[clap(long, default_value_t = 1)]
    page: usize,
}

impl ShowPosts {
    pub async fn execute<A: NetworkApi>(&self, controller: &mut Controller<A>) {
        controller.dispatch(Action::ShowAllPosts).await;
        go_to_group(controller, self.page).await;
    }
}

/// Show user profile and posts
#[derive(Parser)]
pub struct ShowProfile {
    username: String,

    #[clap(long, default_value_t = 1)]
    page: usize,
}

impl ShowProfile {
    pub async fn execute<A: NetworkApi>(&self, controller: &mut Controller<A>) {
        controller.dispatch(Action::ShowProfile(self.username.clone())).await;
        go_to_group(controller, self.page).await;
    }
}

/// Show posts of followed users
#[derive(Parser)]
pub struct ShowFollowing {
    #[clap(long, default_value_t = 1)]
    page: usize,
}

impl ShowFollowing {
    pub async fn execute<A: NetworkApi>(&self, controller: &mut Controller<A>) {
        controller.dispatch(Action::ShowFollowing).await;
        go_to_group(controller, self.page).await;
    }
}

/// Create post
#[derive(Parser)]
pub struct CreatePost {
    content: String,
}

impl CreatePost {
    pub async fn execute<A: NetworkApi>(&self, controller: &mut Controller<A>) {
        controller.dispatch(Action::SubmitPost(self.content.clone())).await;
    }
}

/// Replace content of a post
#[derive(Parser)]
pub struct EditPost {
    id: PostId,
    content: String,
}

impl EditPost {
    pub async fn execute<A: NetworkApi>(&self, controller: &mut Controller<A>) {
        // Load collection to check authorship
        controller.dispatch(Action::ShowAllPosts).await;
        controller.dispatch(Action::SavePost {
            post_id: self.id,
            content: self.content.clone(),
        }).await;
    }
}

/// Follow or unfollow user
#[derive(Parser)]
pub struct ToggleFollow {
    username: String,
}

impl ToggleFollow {
    pub async fn execute<A: NetworkApi>(&self, controller: &mut Controller<A>) {
        controller.dispatch(Action::ShowProfile(self.username.clone())).await;
        controller.dispatch(Action::ToggleFollow(self.username.clone())).await;
    }
}

const BROWSE_HELP: &str = "\
commands:
  all | profile <user> | following
  page <n> | next | prev
  post <text> | edit <id> | save [text] | cancel
  follow | help | quit";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Run(Action),
    Help,
    Quit,
}

fn parse_number<T: std::str::FromStr>(value: Option<&str>) -> Result<T, ValidationError> {
    value
        .ok_or(ValidationError("number is required"))?
        .parse()
        .map_err(|_| ValidationError("invalid number"))
}

/// Parses line of interactive session
pub fn parse_command<A: NetworkApi, P: crate::feed::presenter::Presenter>(
    line: &str,
    controller: &FeedController<A, P>,
) -> Result<Command, ValidationError> {
    let line = line.trim();
    let (name, argument) = match line.split_once(' ') {
        Some((name, argument)) => (name, Some(argument.trim())),
        None => (line, None),
    };
    let action = match name {
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        "all" => Action::ShowAllPosts,
        "profile" => {
            let username = argument
                .filter(|username| !username.is_empty())
                .ok_or(ValidationError("username is required"))?;
            Action::ShowProfile(username.to_string())
        },
        "following" => Action::ShowFollowing,
        "page" => Action::GoToGroup(parse_number(argument)?),
        "next" => {
            let group = controller.feed().page()
                .and_then(|page| page.next_group())
                .ok_or(ValidationError("already on the last page"))?;
            Action::GoToGroup(group)
        },
        "prev" => {
            let group = controller.feed().page()
                .and_then(|page| page.previous_group())
                .ok_or(ValidationError("already on the first page"))?;
            Action::GoToGroup(group)
        },
        "post" => Action::SubmitPost(argument.unwrap_or_default().to_string()),
        "edit" => Action::EditPost(parse_number(argument)?),
        "save" => {
            let form = controller.editing()
                .ok_or(ValidationError("no post is being edited"))?;
            let content = argument
                .map(|content| content.to_string())
                .unwrap_or_else(|| form.draft.clone());
            Action::SavePost { post_id: form.post_id, content }
        },
        "cancel" => Action::CancelEdit,
        "follow" | "unfollow" => match controller.view() {
            ViewState::Profile(username) => Action::ToggleFollow(username.clone()),
            _ => return Err(ValidationError("open a profile first")),
        },
        _ => return Err(ValidationError("unknown command")),
    };
    Ok(Command::Run(action))
}

/// Interactive session
#[derive(Parser)]
pub struct Browse;

impl Browse {
    pub async fn execute<A: NetworkApi>(
        &self,
        controller: &mut Controller<A>,
    ) -> Result<(), Error> {
        controller.dispatch(Action::ShowAllPosts).await;
        controller.presenter_mut().flush();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            };
            match parse_command(&line, controller) {
                Ok(Command::Run(action)) => {
                    controller.dispatch(action).await;
                    controller.presenter_mut().flush();
                },
                Ok(Command::Help) => println!("{}", BROWSE_HELP),
                Ok(Command::Quit) => break,
                Err(error) => println!("{}", error),
            };
        };
        Ok(())
    }
}
