//! Command execution against the engine.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use owo_colors::OwoColorize;

use crece_core::account::{AccountRegistry, UserAccount};
use crece_core::assistant::{AssistantClient, AssistantIntent};
use crece_core::catalog;
use crece_core::config::EngineConfig;
use crece_core::economy::{EconomyGateway, COURSE_PRICE};
use crece_core::error::EngineError;
use crece_core::ledger::Ledger;
use crece_core::objectives::{self, Progression};
use crece_core::prize::ChestResolver;
use crece_core::quiz::{
    Difficulty, Phase, QuizSession, SubmitOutcome, TickOutcome, TICKS_PER_QUESTION,
};
use crece_core::store::{self, FileStore, SharedStore};

/// Everything a command needs: config, the shared store and the registry.
pub struct AppContext {
    pub config: EngineConfig,
    pub store: SharedStore,
    pub registry: AccountRegistry,
}

impl AppContext {
    pub fn open(config: EngineConfig) -> Result<Self> {
        let file_store = FileStore::open(config.store_path())
            .with_context(|| format!("opening store at {}", config.store_path().display()))?;
        let store = store::shared(file_store);
        let registry = AccountRegistry::new(Arc::clone(&store));
        Ok(Self {
            config,
            store,
            registry,
        })
    }

    fn current_user(&self) -> Result<UserAccount> {
        self.registry
            .current()?
            .context("no account registered; run `crecectl register` first")
    }

    fn ledger(&self, user: &UserAccount) -> Arc<Ledger> {
        Arc::new(Ledger::new(
            Arc::clone(&self.store),
            user.email.clone(),
            user.career.clone(),
        ))
    }
}

fn parse_difficulty(raw: &str) -> Result<Difficulty> {
    raw.parse::<Difficulty>().map_err(|e| anyhow::anyhow!(e))
}

pub fn register(
    ctx: &AppContext,
    name: &str,
    email: &str,
    career: &str,
    password: &str,
) -> Result<()> {
    let account = UserAccount::new(name, email, career, password);
    ctx.registry.register(&account)?;
    println!("Welcome, {}! Your account is ready.", name.bold());
    Ok(())
}

pub fn login(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    match ctx.registry.login(email, password)? {
        Some(user) => {
            println!("Hello {} ({}).", user.name.bold(), user.career);
            Ok(())
        }
        None => bail!("email or password did not match"),
    }
}

pub fn status(ctx: &AppContext) -> Result<()> {
    let user = ctx.current_user()?;
    let ledger = ctx.ledger(&user);
    let economy = EconomyGateway::new(Arc::clone(&ledger));

    println!("{} <{}> - {}", user.name.bold(), user.email, user.career);
    println!("Coins: {}", economy.balance()?.to_string().yellow());
    for difficulty in Difficulty::ALL {
        let high = ledger.high_score(difficulty)?;
        let chest = ledger.chest_state(difficulty)?;
        let chest_label = if chest.claimed {
            "chest claimed".dimmed().to_string()
        } else if chest.unlocked {
            "chest ready!".green().to_string()
        } else {
            "chest locked".to_string()
        };
        println!("  {:<6} {:>3}/100  {}", difficulty.label(), high, chest_label);
    }
    println!("Total score: {}", ledger.total_score()?);
    Ok(())
}

fn read_line(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed");
    }
    Ok(line.trim().to_string())
}

pub fn play(ctx: &AppContext, difficulty_raw: &str) -> Result<()> {
    let user = ctx.current_user()?;
    let difficulty = parse_difficulty(difficulty_raw)?;
    let ledger = ctx.ledger(&user);
    let progression = Progression::new(Arc::clone(&ledger));

    let mut session = QuizSession::start(&user.career, difficulty);
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!(
        "{} quiz for {} - 5 questions, {} seconds each. Answer with 1-4.\n",
        difficulty.label().bold(),
        user.career,
        TICKS_PER_QUESTION
    );

    while session.phase() == Phase::Playing {
        // Question fields are 'static, so copy them out before mutating.
        let (text, options, correct_answer) = {
            let question = session
                .current_question()
                .context("session lost its question")?;
            (question.text, question.options, question.correct_answer)
        };

        println!(
            "Question {}/{}: {}",
            session.current_index() + 1,
            session.question_count(),
            text.bold()
        );
        for (i, option) in options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }
        print!("> ");
        io::stdout().flush()?;

        // The engine is tick-driven: measure how long the answer took and
        // replay it as ticks. Blowing the budget times the question out.
        let started = Instant::now();
        let answer = read_line(&mut input)?;
        let elapsed = started.elapsed().as_secs().min(u64::from(TICKS_PER_QUESTION)) as u32;
        for _ in 0..elapsed {
            if session.tick() == TickOutcome::TimedOut {
                break;
            }
        }

        if session.is_answered() {
            println!("{}\n", "Time's up! No points for this one.".red());
        } else {
            let pick = answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .filter(|i| *i < options.len());
            match pick {
                Some(index) => match session.submit_answer(index) {
                    SubmitOutcome::Correct => println!("{}\n", "Correct! +20 points.".green()),
                    SubmitOutcome::Incorrect => {
                        println!("{} The answer was: {}\n", "Not quite.".red(), correct_answer)
                    }
                    SubmitOutcome::Ignored => {}
                },
                None => {
                    println!("{}\n", "Please answer with a number from 1 to 4.".red());
                    continue;
                }
            }
        }
        session.advance();
    }

    let score = session.score();
    println!("Final score: {}", format!("{score}/100").bold());

    if let Some(result) = session.take_result() {
        let outcome = progression.record(&result)?;
        if outcome.new_high {
            println!("{}", "New personal best!".green());
        }
        if outcome.chest_unlocked {
            println!(
                "{}",
                format!(
                    "Perfect run - the {} chest is now unlocked! Open it with `crecectl open {}`.",
                    difficulty.label(),
                    difficulty.key()
                )
                .yellow()
            );
        }
        println!("Total accumulated score: {}", outcome.total_score);
    }

    let suggestions = catalog::suggest_courses(&user.career, 3);
    if !suggestions.is_empty() {
        println!("\nSuggested courses ({} coins each):", COURSE_PRICE);
        for course in suggestions {
            println!("  [{}] {}", course.id, course.title);
        }
    }
    Ok(())
}

pub fn progress(ctx: &AppContext) -> Result<()> {
    let user = ctx.current_user()?;
    let ledger = ctx.ledger(&user);
    let progression = Progression::new(ledger);
    let snapshot = progression.snapshot()?;

    println!(
        "Total: {} / {} points ({}%)\n",
        snapshot.total_score.to_string().bold(),
        objectives::MAX_GOAL,
        snapshot.percent
    );
    for row in &snapshot.objectives {
        let state = if row.claimed {
            "claimed".dimmed().to_string()
        } else if row.achieved {
            format!("claimable - `crecectl claim {}`", row.threshold)
                .green()
                .to_string()
        } else {
            format!("{}%", row.percent)
        };
        println!("  {:>3} pts  {:<22} {}", row.threshold, row.name, state);
    }
    Ok(())
}

pub fn claim(ctx: &AppContext, threshold: u32) -> Result<()> {
    let user = ctx.current_user()?;
    let ledger = ctx.ledger(&user);
    let progression = Progression::new(Arc::clone(&ledger));
    let economy = EconomyGateway::new(ledger);

    let objective = objectives::find_objective(threshold)
        .with_context(|| format!("no milestone at {threshold} points"))?;

    match progression.claim(objective) {
        Ok(prize) => {
            economy.apply_prize(&prize)?;
            println!("{} {}", "Reward claimed:".green().bold(), prize.describe());
            Ok(())
        }
        Err(EngineError::AlreadyClaimed) => {
            println!("That milestone was already claimed.");
            Ok(())
        }
        Err(EngineError::NotYetEarned { required, current }) => {
            bail!("not there yet: {current}/{required} points")
        }
        Err(e) => Err(e.into()),
    }
}

pub fn open_chest(ctx: &AppContext, difficulty_raw: &str) -> Result<()> {
    let user = ctx.current_user()?;
    let difficulty = parse_difficulty(difficulty_raw)?;
    let ledger = ctx.ledger(&user);
    let resolver = ChestResolver::new(Arc::clone(&ledger));
    let economy = EconomyGateway::new(ledger);

    let open = match resolver.open_chest(difficulty) {
        Ok(open) => open,
        Err(EngineError::ChestLocked) => {
            bail!(
                "the {} chest is locked - score a perfect 100 to unlock it",
                difficulty.label()
            )
        }
        Err(EngineError::AlreadyClaimed) => {
            println!("That chest was already opened and claimed.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", format!("{} chest open!", difficulty.label()).bold());
    println!("The wheel holds:");
    for (i, prize) in open.table.iter().enumerate() {
        println!("  {}. {}", i + 1, prize.describe());
    }

    let outcome = resolver.spin(open.ticket)?;
    println!(
        "\nThe wheel spins... and stops on segment {} ({:.0} degrees).",
        outcome.index + 1,
        outcome.rotation_degrees
    );
    println!("{} {}", "You won:".yellow().bold(), outcome.prize.describe());

    let prize = resolver.claim(open.ticket)?;
    economy.apply_prize(&prize)?;
    println!("Prize applied. Coins now: {}", economy.balance()?);
    Ok(())
}

pub fn courses(ctx: &AppContext) -> Result<()> {
    let user = ctx.current_user()?;
    let ledger = ctx.ledger(&user);
    let owned = ledger.owned_courses()?;

    println!("Catalog ({} coins per course):\n", COURSE_PRICE);
    for course in catalog::all_courses() {
        let marker = if owned.contains(&course.id) {
            "owned".green().to_string()
        } else {
            course.difficulty.to_string()
        };
        println!("  [{:^8}] {:<55} {}", course.id, course.title, marker);
    }
    Ok(())
}

pub fn buy(ctx: &AppContext, course_id: &str) -> Result<()> {
    let user = ctx.current_user()?;
    let course = catalog::find(course_id)
        .with_context(|| format!("no course with id {course_id}"))?;
    let ledger = ctx.ledger(&user);
    let economy = EconomyGateway::new(ledger);

    if economy.purchase_course(course.id, COURSE_PRICE)? {
        println!("{} {}", "Unlocked:".green().bold(), course.title);
    } else {
        println!(
            "Not enough coins: {} costs {}, you have {}.",
            course.title,
            COURSE_PRICE,
            economy.balance()?
        );
    }
    Ok(())
}

pub async fn chat(ctx: &AppContext, message: &str) -> Result<()> {
    let user = ctx.current_user()?;
    if ctx.config.assistant.api_key.is_empty() {
        bail!("no assistant API key configured; set [assistant] api_key in the config file");
    }

    let client = AssistantClient::new(ctx.config.assistant.clone())?;
    let reply = client.ask(&user.name, &user.career, message).await?;

    println!("{}", reply.message);
    if reply.intent == AssistantIntent::RecommendCourses {
        for recommendation in &reply.recommendations {
            if let Some(course) = catalog::find(&recommendation.id) {
                println!(
                    "  [{}] {} - {}",
                    course.id, course.title, recommendation.reason
                );
            }
        }
    }
    Ok(())
}
