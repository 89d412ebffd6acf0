//! fairway - golf practice companion
//!
//! This is the command-line front end. It wires together:
//! - Configuration loading
//! - Store initialization
//! - Shot tracker and round analytics
//! - Discussion forum
//! - Usage governor and the AI coaching service

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use fairway_ai::{AiService, AnalysisOutcome, ProxyClient, analyze_with_limit, jpeg_data_url};
use fairway_api::{
    Club, ContentRef, Insight, Post, RoundAnalytics, Shot, ShotConditions, ShotOutcome,
    SwingAnalysis, VoteState,
};
use fairway_config::{Settings, load_config_or_default};
use fairway_core::{
    EditOutcome, Forum, LinkFilter, ReportOutcome, ShotTracker, UsageGovernor,
};
use fairway_store::{RecordStore, SqliteStore};
use fairway_util::{DATABASE_FILENAME, PostId, ReplyId, default_config_path, epoch_millis, time_ago};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// fairway - shot tracking, round stats, a local forum and AI coaching
#[derive(Parser, Debug)]
#[command(name = "fairway", version)]
#[command(about = "Golf practice companion", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/fairway/config.toml)
    #[arg(short, long, env = "FAIRWAY_CONFIG", default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Data directory override (or set FAIRWAY_DATA_DIR env var)
    #[arg(short, long, env = "FAIRWAY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log shots and review the current round
    Shot {
        #[command(subcommand)]
        action: ShotCommand,
    },
    /// Community discussion
    Forum {
        #[command(subcommand)]
        action: ForumCommand,
    },
    /// Show today's swing analysis allowance
    Usage,
    /// Analyze a swing from JPEG frames (uses one of today's analyses)
    Analyze {
        #[arg(required = true)]
        frames: Vec<PathBuf>,
    },
    /// Personalized tips for areas to improve, given as "TITLE: DESCRIPTION"
    Tips {
        #[arg(long = "area", required = true)]
        areas: Vec<String>,
    },
    /// Find golf courses near a location
    Courses { location: String },
    /// Find instructional videos and articles
    Lessons { query: String },
    /// Ask for a club recommendation
    Caddie {
        /// Yards to target
        #[arg(long)]
        distance: u32,
        #[arg(long)]
        lie: Option<String>,
        /// Miles per hour
        #[arg(long)]
        wind_speed: Option<u32>,
        #[arg(long)]
        wind_direction: Option<String>,
        /// Yards, negative for downhill
        #[arg(long, allow_hyphen_values = true)]
        elevation: Option<i32>,
    },
}

#[derive(Subcommand, Debug)]
enum ShotCommand {
    /// Log a shot; omitted fields come from the prefilled draft
    Add {
        #[arg(long)]
        hole: Option<u32>,
        #[arg(long)]
        par: Option<u32>,
        #[arg(long)]
        club: Option<Club>,
        #[arg(long)]
        distance: Option<u32>,
        #[arg(long)]
        outcome: Option<ShotOutcome>,
    },
    /// List the shots of the current round
    List,
    /// Discard the current round
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Show round statistics
    Stats,
}

#[derive(Subcommand, Debug)]
enum ForumCommand {
    /// Start a new discussion
    Post {
        #[arg(long)]
        name: String,
        #[arg(long)]
        message: String,
    },
    /// Reply to a post
    Reply {
        post_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        message: String,
    },
    /// List posts, optionally filtered
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Like { post_id: String },
    Unlike { post_id: String },
    /// Flag a post or reply for moderation
    Report {
        post_id: String,
        #[arg(long)]
        reply: Option<String>,
        #[arg(long)]
        yes: bool,
    },
    /// Edit your own post or reply
    Edit {
        post_id: String,
        #[arg(long)]
        reply: Option<String>,
        #[arg(long)]
        message: String,
    },
}

/// Loaded configuration and the open store
struct App {
    settings: Settings,
    store: Arc<dyn RecordStore>,
}

impl App {
    fn new(args: &Args) -> Result<Self> {
        let mut settings = load_config_or_default(&args.config)
            .with_context(|| format!("Failed to load config from {:?}", args.config))?;

        if let Some(data_dir) = &args.data_dir {
            settings.storage.data_dir = data_dir.clone();
        }

        let data_dir = &settings.storage.data_dir;
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

        let db_path = data_dir.join(DATABASE_FILENAME);
        let store: Arc<dyn RecordStore> = Arc::new(
            SqliteStore::open(&db_path)
                .with_context(|| format!("Failed to open database {:?}", db_path))?,
        );

        debug!(db_path = %db_path.display(), "Store initialized");

        Ok(Self { settings, store })
    }

    fn tracker(&self) -> ShotTracker {
        ShotTracker::load(self.store.clone(), self.settings.tracker.default_par)
    }

    fn forum(&self) -> Result<Forum> {
        let filter = LinkFilter::new(&self.settings.forum.link_pattern)
            .context("Invalid forum link pattern")?;
        Ok(Forum::load(
            self.store.clone(),
            Box::new(filter),
            self.settings.limits,
        ))
    }

    fn governor(&self) -> UsageGovernor {
        UsageGovernor::load(
            self.store.clone(),
            self.settings.limits.daily_analysis_limit,
            fairway_util::today(),
        )
    }

    fn ai(&self) -> Result<ProxyClient> {
        ProxyClient::from_settings(&self.settings.ai).context("Failed to create AI client")
    }

    async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Shot { action } => self.run_shot(action),
            Command::Forum { action } => self.run_forum(action),
            Command::Usage => {
                let today = fairway_util::today();
                let governor = self.governor();
                println!(
                    "Analyses used today: {}/{} ({} remaining)",
                    governor.count(),
                    governor.limit(),
                    governor.remaining(today)
                );
                if fairway_util::is_mock_time_active() {
                    println!("Mock time active, counting usage for {}", today);
                }
                Ok(())
            }
            Command::Analyze { frames } => self.run_analyze(frames).await,
            Command::Tips { areas } => {
                let areas = areas.iter().map(|a| parse_area(a)).collect();
                let tips = self.ai()?.generate_personalized_tips(areas).await?;
                for tip in tips {
                    println!("- {}", tip);
                }
                Ok(())
            }
            Command::Courses { location } => {
                let search = self.ai()?.find_courses(location).await?;
                for course in &search.courses {
                    let rating = course
                        .rating
                        .map(|r| format!(" ({:.1})", r))
                        .unwrap_or_default();
                    println!("{} [{}]{}", course.name, course.kind, rating);
                    println!("  {}", course.address);
                    println!("  {}", course.summary);
                }
                print_sources(search.sources.iter().map(|s| (&s.web.title, &s.web.uri)));
                Ok(())
            }
            Command::Lessons { query } => {
                let search = self.ai()?.find_instructional_content(query).await?;
                for item in &search.content {
                    println!("[{:?}] {}", item.kind, item.title);
                    println!("  {}", item.description);
                    println!("  {}", item.url);
                }
                print_sources(search.sources.iter().map(|s| (&s.web.title, &s.web.uri)));
                Ok(())
            }
            Command::Caddie {
                distance,
                lie,
                wind_speed,
                wind_direction,
                elevation,
            } => {
                let defaults = ShotConditions::default();
                let conditions = ShotConditions {
                    distance,
                    lie: lie.unwrap_or(defaults.lie),
                    wind_speed: wind_speed.unwrap_or(defaults.wind_speed),
                    wind_direction: wind_direction.unwrap_or(defaults.wind_direction),
                    elevation_change: elevation.unwrap_or(defaults.elevation_change),
                };
                let rec = self.ai()?.get_club_recommendation(conditions).await?;
                println!("{} ({} confidence)", rec.club, rec.confidence);
                println!("  {}", rec.reasoning);
                if let Some(alt) = rec.alternative_club {
                    println!("Alternative: {}", alt);
                    if let Some(why) = rec.alternative_reasoning {
                        println!("  {}", why);
                    }
                }
                Ok(())
            }
        }
    }

    fn run_shot(&self, action: ShotCommand) -> Result<()> {
        let mut tracker = self.tracker();
        match action {
            ShotCommand::Add {
                hole,
                par,
                club,
                distance,
                outcome,
            } => {
                let draft = tracker.draft().clone();
                let shot = Shot {
                    hole: hole.unwrap_or(draft.hole),
                    par: par.unwrap_or(draft.par),
                    club: club.unwrap_or(draft.club),
                    distance: distance.unwrap_or(draft.distance),
                    outcome: outcome.unwrap_or(draft.outcome),
                };
                tracker.add_shot(shot)?;
                let next = tracker.draft();
                println!(
                    "Logged shot {}. Next: hole {} (par {})",
                    tracker.round().len(),
                    next.hole,
                    next.par
                );
            }
            ShotCommand::List => {
                if tracker.round().is_empty() {
                    println!("No shots logged yet.");
                }
                for (i, shot) in tracker.round().iter().enumerate() {
                    println!(
                        "{:>3}. Hole {} (par {}): {}, {} yds, {}",
                        i + 1,
                        shot.hole,
                        shot.par,
                        shot.club,
                        shot.distance,
                        shot.outcome
                    );
                }
            }
            ShotCommand::Clear { yes } => {
                if confirm("Clear all shots from the current round?", yes)? {
                    tracker.clear_round()?;
                    println!("Round cleared.");
                } else {
                    println!("Nothing changed.");
                }
            }
            ShotCommand::Stats => match tracker.analytics() {
                Some(analytics) => print_analytics(&analytics),
                None => println!("Log some shots to see your stats."),
            },
        }
        Ok(())
    }

    fn run_forum(&self, action: ForumCommand) -> Result<()> {
        let mut forum = self.forum()?;
        let now = fairway_util::now();

        match action {
            ForumCommand::Post { name, message } => {
                let id = forum.submit_post(&name, &message, now)?;
                println!("Posted {}", id);
            }
            ForumCommand::Reply {
                post_id,
                name,
                message,
            } => match forum.submit_reply(&PostId::new(post_id), &name, &message, now)? {
                Some(id) => println!("Replied {}", id),
                None => bail!("No such post"),
            },
            ForumCommand::List { search } => {
                let posts = forum.search(search.as_deref().unwrap_or(""));
                if posts.is_empty() {
                    println!("No posts found.");
                }
                let now_ms = epoch_millis(&now);
                for post in posts {
                    print_post(post, forum.vote_state(&post.id), now_ms);
                }
            }
            ForumCommand::Like { post_id } => {
                let state = forum.toggle_like(&PostId::new(post_id))?;
                print_vote(state);
            }
            ForumCommand::Unlike { post_id } => {
                let state = forum.toggle_unlike(&PostId::new(post_id))?;
                print_vote(state);
            }
            ForumCommand::Report {
                post_id,
                reply,
                yes,
            } => {
                let target = content_ref(post_id, reply);
                let mut prompt_error = None;
                let outcome = forum.report(&target, |message| {
                    confirm(&format!("Report \"{}\" to moderators?", message), yes)
                        .unwrap_or_else(|e| {
                            prompt_error = Some(e);
                            false
                        })
                })?;
                if let Some(e) = prompt_error {
                    return Err(e);
                }
                match outcome {
                    ReportOutcome::Reported => println!("Reported."),
                    ReportOutcome::Declined => println!("Nothing changed."),
                    ReportOutcome::AlreadyReported => println!("Already reported."),
                    ReportOutcome::NotFound => bail!("No such post or reply"),
                }
            }
            ForumCommand::Edit {
                post_id,
                reply,
                message,
            } => {
                let target = content_ref(post_id, reply);
                match forum.edit_own_content(&target, &message)? {
                    EditOutcome::Saved => println!("Saved."),
                    EditOutcome::Cancelled => println!("Edit discarded."),
                    EditOutcome::NotPermitted => {
                        println!("You can only edit your own, unreported content.")
                    }
                    EditOutcome::NoEditInProgress => {}
                }
            }
        }
        Ok(())
    }

    async fn run_analyze(&self, paths: Vec<PathBuf>) -> Result<()> {
        let frames = paths
            .iter()
            .map(|path| {
                std::fs::read(path)
                    .map(|bytes| jpeg_data_url(&bytes))
                    .with_context(|| format!("Failed to read frame {:?}", path))
            })
            .collect::<Result<Vec<_>>>()?;

        let ai = self.ai()?;
        let mut governor = self.governor();
        let today = fairway_util::today();

        match analyze_with_limit(&mut governor, &ai, frames, today).await? {
            AnalysisOutcome::Completed(analysis) => {
                print_swing_analysis(&analysis);
                println!();
                println!(
                    "{} of {} analyses left today.",
                    governor.remaining(today),
                    governor.limit()
                );
            }
            AnalysisOutcome::LimitReached { limit } => {
                println!("You have reached your daily analysis limit ({}).", limit);
            }
        }
        Ok(())
    }
}

fn content_ref(post_id: String, reply: Option<String>) -> ContentRef {
    let post_id = PostId::new(post_id);
    match reply {
        Some(reply_id) => ContentRef::Reply {
            post_id,
            reply_id: ReplyId::new(reply_id),
        },
        None => ContentRef::Post(post_id),
    }
}

/// "Title: description"; text without a colon is all title
fn parse_area(area: &str) -> Insight {
    match area.split_once(':') {
        Some((title, description)) => Insight {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
        },
        None => Insight {
            title: area.trim().to_string(),
            description: String::new(),
        },
    }
}

/// Ask on stdin unless `assume_yes` is set
fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }

    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

fn print_analytics(analytics: &RoundAnalytics) {
    println!(
        "Score: {} ({} strokes, par {})",
        analytics.score_label(),
        analytics.total_strokes,
        analytics.total_par
    );
    println!("Fairways in regulation: {:.0}%", analytics.fir);
    println!("Greens in regulation:   {:.0}%", analytics.gir);

    println!();
    println!("Outcomes:");
    for (outcome, count) in &analytics.outcomes {
        println!(
            "  {:<14} {:>3} ({:.0}%)",
            outcome.name(),
            count,
            analytics.outcome_share(*outcome)
        );
    }

    if !analytics.avg_club_distances.is_empty() {
        println!();
        println!("Average distance:");
        for entry in &analytics.avg_club_distances {
            println!("  {:<14} {:>3} yds", entry.club.name(), entry.avg);
        }
    }
}

fn print_post(post: &Post, vote: VoteState, now_ms: i64) {
    let flag = if post.reported { " [reported]" } else { "" };
    let marker = match vote {
        VoteState::Liked => " (you liked)",
        VoteState::Unliked => " (you unliked)",
        VoteState::Neutral => "",
    };
    println!(
        "{} | {} | {}{}",
        post.id,
        post.name,
        time_ago(post.timestamp, now_ms),
        flag
    );
    println!("  {}", post.message);
    println!("  +{} / -{}{}", post.likes, post.unlikes, marker);
    for reply in &post.replies {
        let flag = if reply.reported { " [reported]" } else { "" };
        println!(
            "    {} | {} | {}{}",
            reply.id,
            reply.name,
            time_ago(reply.timestamp, now_ms),
            flag
        );
        println!("      {}", reply.message);
    }
    println!();
}

fn print_vote(state: Option<VoteState>) {
    match state {
        Some(VoteState::Liked) => println!("Liked."),
        Some(VoteState::Unliked) => println!("Unliked."),
        Some(VoteState::Neutral) => println!("Vote removed."),
        None => println!("No such post."),
    }
}

fn print_swing_analysis(analysis: &SwingAnalysis) {
    println!("{}", analysis.overall_summary);
    if !analysis.strengths.is_empty() {
        println!();
        println!("Strengths:");
        for item in &analysis.strengths {
            println!("  - {}: {}", item.title, item.description);
        }
    }
    if !analysis.areas_for_improvement.is_empty() {
        println!();
        println!("Areas for improvement:");
        for item in &analysis.areas_for_improvement {
            println!("  - {}: {}", item.title, item.description);
        }
    }
    if !analysis.suggested_drills.is_empty() {
        println!();
        println!("Drills:");
        for drill in &analysis.suggested_drills {
            println!("  - {}: {}", drill.name, drill.instructions);
            if let Some(url) = &drill.video_url {
                println!("    {}", url);
            }
        }
    }
}

fn print_sources<'a>(sources: impl Iterator<Item = (&'a String, &'a String)>) {
    let sources: Vec<_> = sources.collect();
    if sources.is_empty() {
        return;
    }
    println!();
    println!("Sources:");
    for (title, uri) in sources {
        println!("  {} - {}", title, uri);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so command output stays clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    debug!(version = env!("CARGO_PKG_VERSION"), "fairway starting");

    let app = App::new(&args)?;
    app.run(args.command).await
}
