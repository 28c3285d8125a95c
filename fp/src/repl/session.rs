//! Interactive session: form prompts, plan display, chat loop

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use super::view::PlanView;
use crate::domain::{
    AGE_MAX, AGE_MIN, DEFAULT_AGE, DEFAULT_CURRENT_WEIGHT_KG, DEFAULT_NUMBER_OF_WEEKS, DEFAULT_TARGET_WEIGHT_KG,
    Gender, PlanRequest, WEEKS_MAX, WEEKS_MIN, WEIGHT_MAX_KG, WEIGHT_MIN_KG,
};
use crate::llm::Role;
use crate::planner::Planner;

/// Answers supplied ahead of the form, from CLI flags
///
/// A field set here counts as already answered: the form does not ask
/// for it. Only the missing fields are prompted.
#[derive(Debug, Clone, Default)]
pub struct FormDefaults {
    pub workout_type: Option<String>,
    pub diet_type: Option<String>,
    pub current_weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub dietary_restrictions: Option<String>,
    pub health_conditions: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub number_of_weeks: Option<u32>,
    pub comments: Option<String>,
}

impl FormDefaults {
    /// True when at least one field still needs to be asked
    fn missing_any(&self) -> bool {
        self.workout_type.is_none()
            || self.diet_type.is_none()
            || self.current_weight.is_none()
            || self.target_weight.is_none()
            || self.dietary_restrictions.is_none()
            || self.health_conditions.is_none()
            || self.age.is_none()
            || self.gender.is_none()
            || self.number_of_weeks.is_none()
            || self.comments.is_none()
    }
}

/// Interactive planning session
pub struct ReplSession {
    planner: Planner,
    view: PlanView,
}

impl ReplSession {
    pub fn new(planner: Planner, view: PlanView) -> Self {
        Self { planner, view }
    }

    /// Run the session: form, generation, then the chat loop
    ///
    /// `request` (from `--request`) skips the form for the first plan;
    /// fields answered in `supplied` are not prompted.
    pub async fn run(&mut self, request: Option<PlanRequest>, supplied: FormDefaults) -> Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        // First plan: keep offering the form until a generation succeeds
        // or the user leaves. A generation failure re-opens the form,
        // asking everything again with the previous answers suggested.
        let mut current_request = match request {
            Some(req) => req,
            None => match self.prompt_form(&mut rl, &supplied, None)? {
                Some(req) => req,
                None => return Ok(()),
            },
        };

        loop {
            match self.generate_and_render(&current_request).await {
                Ok(()) => break,
                Err(e) => {
                    println!("{} {}", "Error:".red(), e);
                    match self.prompt_form(&mut rl, &FormDefaults::default(), Some(&current_request))? {
                        Some(req) => current_request = req,
                        None => return Ok(()),
                    }
                }
            }
        }

        println!();
        println!("{}", "Converse with your plan".bright_cyan().bold());
        println!("Type {} for commands, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();

        // Chat loop
        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    if input.starts_with('/') {
                        match self.handle_slash_command(input) {
                            SlashResult::Continue => continue,
                            SlashResult::Quit => break,
                            SlashResult::NewPlan => {
                                let Some(req) =
                                    self.prompt_form(&mut rl, &FormDefaults::default(), Some(&current_request))?
                                else {
                                    break;
                                };
                                match self.generate_and_render(&req).await {
                                    Ok(()) => current_request = req,
                                    Err(e) => {
                                        // prior plan and transcript stay intact
                                        println!("{} {}", "Error:".red(), e);
                                        println!("{}", "Keeping the previous plan.".dimmed());
                                    }
                                }
                                continue;
                            }
                        }
                    } else {
                        self.process_question(input).await?;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D - exit
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "Fitness and Diet Planner".bright_cyan().bold());
        println!();
    }

    /// Generate a plan and render it on success
    async fn generate_and_render(&mut self, request: &PlanRequest) -> Result<(), crate::planner::PlannerError> {
        println!();
        println!("{}", "Generating personalized fitness and diet plans...".dimmed());

        let plan = self.planner.generate_plan(request).await?;

        println!("{} {}", "✓".green(), "Plans generated successfully!".green());
        println!();
        println!("{}", "Your Plans:".bright_cyan().bold());
        self.view.print_plan(&plan);
        Ok(())
    }

    /// Ask a follow-up question and print the assistant turn
    async fn process_question(&mut self, question: &str) -> Result<()> {
        let answer = self
            .planner
            .ask(question)
            .await
            .map_err(|e| eyre::eyre!("Question failed: {}", e))?;

        println!();
        self.view.print_answer(&answer);
        println!();
        Ok(())
    }

    /// Ask for the request fields that are still missing
    ///
    /// Fields present in `supplied` are taken as-is and never prompted.
    /// For the fields that are asked, `suggest` (the previous request,
    /// when regenerating) provides the offered default.
    ///
    /// Returns None when the user ends input (Ctrl+D) or interrupts.
    fn prompt_form(
        &self,
        rl: &mut DefaultEditor,
        supplied: &FormDefaults,
        suggest: Option<&PlanRequest>,
    ) -> Result<Option<PlanRequest>> {
        if supplied.missing_any() {
            println!();
            println!("{}", "Enter your details:".bright_cyan().bold());
        }

        macro_rules! field {
            ($e:expr) => {
                match $e? {
                    Some(v) => v,
                    None => {
                        println!();
                        return Ok(None);
                    }
                }
            };
        }

        let workout_type = match supplied.workout_type.clone() {
            Some(v) => v,
            None => field!(prompt_text(
                rl,
                "Workout Type (e.g., Weight Loss, Muscle Gain)",
                suggest.map(|r| r.workout_type.as_str())
            )),
        };
        let diet_type = match supplied.diet_type.clone() {
            Some(v) => v,
            None => field!(prompt_text(
                rl,
                "Diet Type (e.g., Indian, Mediterranean)",
                suggest.map(|r| r.diet_type.as_str())
            )),
        };
        let current_weight = match supplied.current_weight {
            Some(v) => v,
            None => field!(prompt_f64(
                rl,
                "Current Body Weight (kg)",
                suggest.map(|r| r.current_weight).unwrap_or(DEFAULT_CURRENT_WEIGHT_KG),
                WEIGHT_MIN_KG,
                WEIGHT_MAX_KG
            )),
        };
        let target_weight = match supplied.target_weight {
            Some(v) => v,
            None => field!(prompt_f64(
                rl,
                "Target Weight (kg)",
                suggest.map(|r| r.target_weight).unwrap_or(DEFAULT_TARGET_WEIGHT_KG),
                WEIGHT_MIN_KG,
                WEIGHT_MAX_KG
            )),
        };
        let dietary_restrictions = match supplied.dietary_restrictions.clone() {
            Some(v) => v,
            None => field!(prompt_text(
                rl,
                "Dietary Restrictions",
                suggest.map(|r| r.dietary_restrictions.as_str())
            )),
        };
        let health_conditions = match supplied.health_conditions.clone() {
            Some(v) => v,
            None => field!(prompt_text(
                rl,
                "Any Health Conditions?",
                suggest.map(|r| r.health_conditions.as_str())
            )),
        };
        let age = match supplied.age {
            Some(v) => v,
            None => field!(prompt_u32(
                rl,
                "Age",
                suggest.map(|r| r.age).unwrap_or(DEFAULT_AGE),
                AGE_MIN,
                AGE_MAX
            )),
        };
        let gender = match supplied.gender {
            Some(v) => v,
            None => field!(prompt_gender(rl, suggest.map(|r| r.gender))),
        };
        let number_of_weeks = match supplied.number_of_weeks {
            Some(v) => v,
            None => field!(prompt_u32(
                rl,
                "Number of Weeks",
                suggest.map(|r| r.number_of_weeks).unwrap_or(DEFAULT_NUMBER_OF_WEEKS),
                WEEKS_MIN,
                WEEKS_MAX
            )),
        };
        let comments = match supplied.comments.clone() {
            Some(v) => v,
            None => field!(prompt_text(rl, "Additional Comments", suggest.map(|r| r.comments.as_str()))),
        };

        Ok(Some(PlanRequest {
            workout_type,
            diet_type,
            current_weight,
            target_weight,
            dietary_restrictions,
            health_conditions,
            age,
            gender,
            number_of_weeks,
            comments,
        }))
    }

    /// Handle slash commands
    fn handle_slash_command(&self, input: &str) -> SlashResult {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");

        match cmd {
            "/help" | "/h" => {
                self.print_help();
                SlashResult::Continue
            }
            "/quit" | "/q" | "/exit" => SlashResult::Quit,
            "/plan" | "/p" => {
                match self.planner.session().plan() {
                    Some(plan) => {
                        println!();
                        self.view.print_plan(plan);
                    }
                    None => println!("{}", "No plan yet.".dimmed()),
                }
                SlashResult::Continue
            }
            "/history" => {
                self.print_history();
                SlashResult::Continue
            }
            "/new" | "/n" => SlashResult::NewPlan,
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
                SlashResult::Continue
            }
        }
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:12} Show this help", "/help".yellow());
        println!("  {:12} Show the current plan again", "/plan".yellow());
        println!("  {:12} Show the conversation so far", "/history".yellow());
        println!("  {:12} Fill the form again and regenerate", "/new".yellow());
        println!("  {:12} Exit", "/quit".yellow());
        println!();
        println!("Anything else is asked as a question about your plan.");
        println!();
    }

    fn print_history(&self) {
        let transcript = self.planner.session().transcript();
        if transcript.is_empty() {
            println!("{}", "No conversation yet.".dimmed());
            return;
        }

        println!();
        println!("{}", "Conversation:".bright_cyan());
        for (i, turn) in transcript.iter().enumerate() {
            let role = match turn.role {
                Role::User => "You".bright_green(),
                Role::Assistant => "Planner".bright_blue(),
            };
            let preview: String = turn.content.chars().take(60).collect();
            let preview = if turn.content.chars().count() > 60 {
                format!("{}...", preview)
            } else {
                preview
            };
            println!("  {}. {}: {}", i + 1, role, preview);
        }
        println!();
    }
}

/// Result of handling a slash command
enum SlashResult {
    Continue,
    NewPlan,
    Quit,
}

/// Prompt for a free-text field; empty input takes the default
fn prompt_text(rl: &mut DefaultEditor, label: &str, default: Option<&str>) -> Result<Option<String>> {
    let prompt = match default {
        Some(d) if !d.is_empty() => format!("{} [{}]: ", label, d),
        _ => format!("{}: ", label),
    };

    match read_line(rl, &prompt)? {
        Some(line) => {
            let line = line.trim();
            if line.is_empty() {
                Ok(Some(default.unwrap_or("").to_string()))
            } else {
                Ok(Some(line.to_string()))
            }
        }
        None => Ok(None),
    }
}

/// Prompt for a number in `[min, max]`, re-asking until it parses
fn prompt_f64(rl: &mut DefaultEditor, label: &str, default: f64, min: f64, max: f64) -> Result<Option<f64>> {
    let prompt = format!("{} [{}]: ", label, default);
    loop {
        let Some(line) = read_line(rl, &prompt)? else {
            return Ok(None);
        };
        let line = line.trim();
        if line.is_empty() {
            return Ok(Some(default));
        }
        match line.parse::<f64>() {
            Ok(v) if v >= min && v <= max => return Ok(Some(v)),
            Ok(v) => println!("{} {} must be between {} and {}, got {}", "!".yellow(), label, min, max, v),
            Err(_) => println!("{} Enter a number", "!".yellow()),
        }
    }
}

fn prompt_u32(rl: &mut DefaultEditor, label: &str, default: u32, min: u32, max: u32) -> Result<Option<u32>> {
    let prompt = format!("{} [{}]: ", label, default);
    loop {
        let Some(line) = read_line(rl, &prompt)? else {
            return Ok(None);
        };
        let line = line.trim();
        if line.is_empty() {
            return Ok(Some(default));
        }
        match line.parse::<u32>() {
            Ok(v) if v >= min && v <= max => return Ok(Some(v)),
            Ok(v) => println!("{} {} must be between {} and {}, got {}", "!".yellow(), label, min, max, v),
            Err(_) => println!("{} Enter a whole number", "!".yellow()),
        }
    }
}

fn prompt_gender(rl: &mut DefaultEditor, default: Option<Gender>) -> Result<Option<Gender>> {
    let default = default.unwrap_or(Gender::Male);
    let prompt = format!("Gender (male/female/other) [{}]: ", default);
    loop {
        let Some(line) = read_line(rl, &prompt)? else {
            return Ok(None);
        };
        let line = line.trim();
        if line.is_empty() {
            return Ok(Some(default));
        }
        match line.parse::<Gender>() {
            Ok(g) => return Ok(Some(g)),
            Err(e) => println!("{} {}", "!".yellow(), e),
        }
    }
}

/// One readline call; None means the user ended input
fn read_line(rl: &mut DefaultEditor, prompt: &str) -> Result<Option<String>> {
    match rl.readline(prompt) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(eyre::eyre!("Readline error: {}", err)),
    }
}
