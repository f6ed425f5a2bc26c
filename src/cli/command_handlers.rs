use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::api::client::OrgClient;
use crate::api::models::{
    Agent, AgentStatus, CreateAgentRequest, CreateLeadGroupRequest, CreateRoutineRequest,
    CreateUserRequest, CreateVoiceAssetRequest, LeadGroup, ListEnvelope, Routine,
    UpdateAgentRequest, UpdateLeadGroupRequest, UpdateRoutineRequest, UpdateUserRequest,
    UpdateVoiceAssetRequest, User, UserRole, VoiceAsset,
};
use crate::cli::main_types::{
    AgentCommands, AuthCommands, LeadGroupCommands, ListArgs, RoutineCommands, UserCommands,
    VoiceCommands,
};
use crate::core::auth::{TokenInput, verify_token};
use crate::core::preview::PreviewCoordinator;
use crate::core::services::{
    CreateService, DeleteService, GetService, ListParams, ListService, Resource, ResourceService,
    UpdateService,
};
use crate::display::{InteractivePager, TableRenderer};
use crate::error::{AppError, CliError, UtilsError};
use crate::storage::config::Profile;
use crate::storage::credentials::{AuthMode, Credentials};
use crate::table::{
    ColumnDef, ColumnFilter, PageMetadata, PageRequest, PageUpdate, SortDescriptor,
    TableController, TableOptions,
};
use crate::utils::logging::print_verbose;
use crate::utils::validation::{parse_filter_spec, parse_sort_spec};

/// Ambient settings for list commands.
pub struct ListContext {
    pub default_page_size: usize,
    pub verbose: bool,
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn confirm(prompt: &str, yes: bool) -> Result<bool, AppError> {
    if yes {
        return Ok(true);
    }
    print!("{} [y/N]: ", prompt);
    io::stdout().flush().map_err(|e| {
        AppError::Utils(UtilsError::InputProcessing {
            message: format!("Failed to flush stdout: {}", e),
        })
    })?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer).map_err(|e| {
        AppError::Utils(UtilsError::InputProcessing {
            message: format!("Failed to read confirmation: {}", e),
        })
    })?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

// === Generic list flow ===

/// Runs a `list` subcommand through a table controller.
///
/// Two paths, mirroring the controller's two modes:
/// - server mode (default): one fetch for the requested page, totals from the
///   response metadata, pagination intents routed through the controller's
///   upward event;
/// - local mode (`--interactive` or any `--filter`): every page is fetched up
///   front and the controller pages, sorts, and filters client-side.
pub async fn run_list<T: Resource>(
    service: &ResourceService<T>,
    columns: Vec<ColumnDef<T>>,
    args: ListArgs,
    context: &ListContext,
    activate: &mut dyn FnMut(&T) -> Option<String>,
) -> Result<(), AppError> {
    let sort = args.sort.as_deref().map(parse_sort_spec).transpose()?;
    let filters = args
        .filter
        .iter()
        .map(|spec| parse_filter_spec(spec))
        .collect::<Result<Vec<_>, _>>()?;
    let renderer = TableRenderer::new().with_colors(!args.no_color);
    let limit = args.limit.unwrap_or(context.default_page_size as u32).max(1) as usize;

    if args.interactive || !filters.is_empty() {
        run_list_local(
            service, columns, &args, sort, filters, limit, &renderer, context, activate,
        )
        .await
    } else {
        run_list_server(service, columns, &args, sort, limit, &renderer).await
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_list_local<T: Resource>(
    service: &ResourceService<T>,
    columns: Vec<ColumnDef<T>>,
    args: &ListArgs,
    sort: Option<SortDescriptor>,
    filters: Vec<(String, String)>,
    limit: usize,
    renderer: &TableRenderer,
    context: &ListContext,
    activate: &mut dyn FnMut(&T) -> Option<String>,
) -> Result<(), AppError> {
    let rows = fetch_all(service, args.search.clone(), context.verbose).await?;

    let mut controller = TableController::builder(columns)
        .rows(rows)
        .options(TableOptions {
            initial_page_size: limit,
            ..TableOptions::default()
        })
        .build();

    if let Some(descriptor) = sort {
        controller.set_sorting(vec![descriptor]);
    }
    for (column, value) in filters {
        controller.set_column_filter(&column, ColumnFilter::equals(value));
    }
    if let Some(page) = args.page {
        controller.set_pagination(PageUpdate::page(page.max(1) as usize));
    }

    if args.interactive {
        let mut pager = InteractivePager::new()?;
        pager.run(&mut controller, renderer, activate)?;
    } else {
        println!("{}", renderer.render(&controller));
        println!("{}", renderer.render_page_info(&controller));
    }
    Ok(())
}

async fn run_list_server<T: Resource>(
    service: &ResourceService<T>,
    columns: Vec<ColumnDef<T>>,
    args: &ListArgs,
    sort: Option<SortDescriptor>,
    limit: usize,
    renderer: &TableRenderer,
) -> Result<(), AppError> {
    let page = args.page.unwrap_or(1).max(1) as usize;

    // The fetch descriptor comes out of the controller's upward event, the
    // same round trip a long-lived view makes.
    let requested = Rc::new(RefCell::new(PageRequest { page, limit }));
    let sink = Rc::clone(&requested);
    let mut controller = TableController::builder(columns)
        .options(TableOptions {
            initial_page_size: limit,
            manual_pagination: true,
            manual_sorting: true,
            ..TableOptions::default()
        })
        .on_pagination_change(move |request| *sink.borrow_mut() = request)
        .on_sorting_change(|_| {})
        .build();
    controller.set_pagination(PageUpdate {
        page: Some(page),
        limit: None,
    });

    let request = *requested.borrow();
    controller.set_controlled_pagination(request);
    if let Some(descriptor) = &sort {
        controller.set_controlled_sorting(vec![descriptor.clone()]);
    }

    let params = ListParams::for_page(request.page as u32, request.limit as u32)
        .with_search(args.search.clone())
        .with_sort(sort.into_iter().collect());
    let envelope = service.list(params).await?;
    let has_meta = envelope.meta.is_some();
    if let Some(meta) = envelope.meta {
        controller.set_page_metadata(PageMetadata {
            limit: meta.limit,
            offset: meta.offset,
            total: meta.total,
        });
    }
    controller.set_rows(envelope.data);

    println!("{}", renderer.render(&controller));
    if has_meta {
        println!("{}", renderer.render_page_info(&controller));
    } else {
        println!("Showing {} records (no totals reported)", controller.page_rows().len());
    }
    Ok(())
}

/// Collects every page of a collection for local-mode browsing.
async fn fetch_all<T: Resource>(
    service: &ResourceService<T>,
    search: Option<String>,
    verbose: bool,
) -> Result<Vec<T>, AppError> {
    const FETCH_PAGE_SIZE: u32 = 100;

    let mut rows: Vec<T> = Vec::new();
    let mut page = 1u32;
    loop {
        let params = ListParams::for_page(page, FETCH_PAGE_SIZE).with_search(search.clone());
        let envelope = service.list(params).await?;
        let count = envelope.data.len();
        rows.extend(envelope.data);
        print_verbose(
            verbose,
            &format!("Fetched {} records (page {})", count, page),
        );

        let total = envelope.meta.map(|meta| meta.total);
        if count < FETCH_PAGE_SIZE as usize || total.is_some_and(|total| rows.len() >= total) {
            break;
        }
        page += 1;
    }
    Ok(rows)
}

// === Auth ===

pub async fn handle_auth(
    command: AuthCommands,
    profile: &Profile,
    profile_name: &str,
    credentials: &Credentials,
    api_token: Option<&str>,
    verbose: bool,
) -> Result<(), AppError> {
    match command {
        AuthCommands::Login { token } => {
            print_verbose(verbose, "Attempting auth login command");

            let input = TokenInput::from_arg_or_prompt(token)?;
            input.validate()?;

            let client = OrgClient::with_api_token(profile.api_url.clone(), input.token.clone())?;
            let user = verify_token(&client).await?;

            Credentials::save_token_for_profile(profile_name, &input.token)?;
            println!("✅ Logged in as {} ({})", user.name, user.role);
            println!("Connected to: {}", profile.api_url);
            Ok(())
        }
        AuthCommands::Logout => {
            print_verbose(verbose, "Attempting auth logout command");
            Credentials::clear_token_for_profile(profile_name)?;
            println!("✅ Logged out from profile: {}", profile_name);
            Ok(())
        }
        AuthCommands::Status => {
            match credentials.get_auth_mode() {
                AuthMode::EnvToken => {
                    println!("Auth mode: environment token (DIALDESK_API_TOKEN)")
                }
                AuthMode::StoredToken => {
                    println!("Auth mode: stored token (profile '{}')", profile_name)
                }
            }

            let token = api_token
                .map(str::to_string)
                .or_else(|| credentials.get_api_token());
            let Some(token) = token else {
                println!("Not logged in.");
                println!("💡 'dialdesk auth login' or set DIALDESK_API_TOKEN");
                return Ok(());
            };

            let client = OrgClient::with_api_token(profile.api_url.clone(), token)?;
            match verify_token(&client).await {
                Ok(user) => {
                    println!(
                        "✅ Authenticated as {} <{}> ({})",
                        user.name, user.email, user.role
                    );
                    Ok(())
                }
                Err(AppError::Auth(_)) => {
                    println!("❌ Stored token is no longer valid");
                    println!("💡 'dialdesk auth login' to store a fresh API token");
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
    }
}

// === Agents ===

fn agent_columns() -> Vec<ColumnDef<Agent>> {
    vec![
        ColumnDef::new("id", "ID", |agent: &Agent| agent.id.to_string()),
        ColumnDef::new("name", "Name", |agent: &Agent| agent.name.clone()),
        ColumnDef::new("status", "Status", |agent: &Agent| agent.status.to_string()),
        ColumnDef::new("routine_id", "Routine", |agent: &Agent| {
            agent
                .routine_id
                .map(|id| id.to_string())
                .unwrap_or_default()
        }),
        ColumnDef::new("voice_id", "Voice", |agent: &Agent| {
            agent.voice_id.map(|id| id.to_string()).unwrap_or_default()
        }),
        ColumnDef::new("created_at", "Created", |agent: &Agent| {
            format_date(&agent.created_at)
        })
        .with_comparator(|a: &Agent, b: &Agent| a.created_at.cmp(&b.created_at)),
    ]
}

fn agent_details(agent: &Agent) -> Vec<(&'static str, String)> {
    vec![
        ("ID", agent.id.to_string()),
        ("Name", agent.name.clone()),
        ("Description", agent.description.clone().unwrap_or_default()),
        ("Status", agent.status.to_string()),
        (
            "Routine",
            agent
                .routine_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        ),
        (
            "Voice",
            agent.voice_id.map(|id| id.to_string()).unwrap_or_default(),
        ),
        ("Created", agent.created_at.to_rfc3339()),
        ("Updated", agent.updated_at.to_rfc3339()),
    ]
}

pub async fn handle_agents(
    command: AgentCommands,
    client: OrgClient,
    context: &ListContext,
) -> Result<(), AppError> {
    let service = ResourceService::<Agent>::new(client);
    match command {
        AgentCommands::List { args } => {
            let mut noop = |_: &Agent| None;
            run_list(&service, agent_columns(), args, context, &mut noop).await
        }
        AgentCommands::Get { id } => {
            let agent = service.get(id).await?;
            println!("{}", TableRenderer::new().render_details(&agent_details(&agent)));
            Ok(())
        }
        AgentCommands::Create {
            name,
            description,
            routine_id,
            voice_id,
        } => {
            let agent = service
                .create(CreateAgentRequest {
                    name,
                    description,
                    routine_id,
                    voice_id,
                })
                .await?;
            println!("✅ Created agent #{} '{}'", agent.id, agent.name);
            Ok(())
        }
        AgentCommands::Update {
            id,
            name,
            description,
            status,
            routine_id,
            voice_id,
        } => {
            let status = status
                .map(|value| value.parse::<AgentStatus>())
                .transpose()
                .map_err(CliError::InvalidArguments)?;
            let agent = service
                .update(
                    id,
                    UpdateAgentRequest {
                        name,
                        description,
                        status,
                        routine_id,
                        voice_id,
                    },
                )
                .await?;
            println!("✅ Updated agent #{} '{}'", agent.id, agent.name);
            Ok(())
        }
        AgentCommands::Delete { id, yes } => {
            if !confirm(&format!("Delete agent {}?", id), yes)? {
                println!("Aborted.");
                return Ok(());
            }
            service.delete(id).await?;
            println!("✅ Deleted agent #{}", id);
            Ok(())
        }
    }
}

// === Routines ===

fn routine_columns() -> Vec<ColumnDef<Routine>> {
    vec![
        ColumnDef::new("id", "ID", |routine: &Routine| routine.id.to_string()),
        ColumnDef::new("name", "Name", |routine: &Routine| routine.name.clone()),
        ColumnDef::new("step_count", "Steps", |routine: &Routine| {
            routine.step_count.to_string()
        }),
        ColumnDef::new("enabled", "Enabled", |routine: &Routine| {
            if routine.enabled { "yes" } else { "no" }.to_string()
        }),
        ColumnDef::new("updated_at", "Updated", |routine: &Routine| {
            format_date(&routine.updated_at)
        })
        .with_comparator(|a: &Routine, b: &Routine| a.updated_at.cmp(&b.updated_at)),
    ]
}

fn routine_details(routine: &Routine) -> Vec<(&'static str, String)> {
    vec![
        ("ID", routine.id.to_string()),
        ("Name", routine.name.clone()),
        (
            "Description",
            routine.description.clone().unwrap_or_default(),
        ),
        ("Steps", routine.step_count.to_string()),
        ("Enabled", routine.enabled.to_string()),
        ("Created", routine.created_at.to_rfc3339()),
        ("Updated", routine.updated_at.to_rfc3339()),
    ]
}

pub async fn handle_routines(
    command: RoutineCommands,
    client: OrgClient,
    context: &ListContext,
) -> Result<(), AppError> {
    let service = ResourceService::<Routine>::new(client);
    match command {
        RoutineCommands::List { args } => {
            let mut noop = |_: &Routine| None;
            run_list(&service, routine_columns(), args, context, &mut noop).await
        }
        RoutineCommands::Get { id } => {
            let routine = service.get(id).await?;
            println!(
                "{}",
                TableRenderer::new().render_details(&routine_details(&routine))
            );
            Ok(())
        }
        RoutineCommands::Create { name, description } => {
            let routine = service
                .create(CreateRoutineRequest { name, description })
                .await?;
            println!("✅ Created routine #{} '{}'", routine.id, routine.name);
            Ok(())
        }
        RoutineCommands::Update {
            id,
            name,
            description,
            enabled,
        } => {
            let routine = service
                .update(
                    id,
                    UpdateRoutineRequest {
                        name,
                        description,
                        enabled,
                    },
                )
                .await?;
            println!("✅ Updated routine #{} '{}'", routine.id, routine.name);
            Ok(())
        }
        RoutineCommands::Delete { id, yes } => {
            if !confirm(&format!("Delete routine {}?", id), yes)? {
                println!("Aborted.");
                return Ok(());
            }
            service.delete(id).await?;
            println!("✅ Deleted routine #{}", id);
            Ok(())
        }
    }
}

// === Users ===

fn user_columns() -> Vec<ColumnDef<User>> {
    vec![
        ColumnDef::new("id", "ID", |user: &User| user.id.to_string()),
        ColumnDef::new("name", "Name", |user: &User| user.name.clone()),
        ColumnDef::new("email", "Email", |user: &User| user.email.clone()),
        ColumnDef::new("role", "Role", |user: &User| user.role.to_string()),
        ColumnDef::new("active", "Active", |user: &User| {
            if user.active { "yes" } else { "no" }.to_string()
        }),
        ColumnDef::new("created_at", "Created", |user: &User| {
            format_date(&user.created_at)
        })
        .with_comparator(|a: &User, b: &User| a.created_at.cmp(&b.created_at)),
    ]
}

fn user_details(user: &User) -> Vec<(&'static str, String)> {
    vec![
        ("ID", user.id.to_string()),
        ("Name", user.name.clone()),
        ("Email", user.email.clone()),
        ("Role", user.role.to_string()),
        ("Active", user.active.to_string()),
        ("Created", user.created_at.to_rfc3339()),
    ]
}

pub async fn handle_users(
    command: UserCommands,
    client: OrgClient,
    context: &ListContext,
) -> Result<(), AppError> {
    let service = ResourceService::<User>::new(client);
    match command {
        UserCommands::List { args } => {
            let mut noop = |_: &User| None;
            run_list(&service, user_columns(), args, context, &mut noop).await
        }
        UserCommands::Get { id } => {
            let user = service.get(id).await?;
            println!("{}", TableRenderer::new().render_details(&user_details(&user)));
            Ok(())
        }
        UserCommands::Create { name, email, role } => {
            let role = role
                .parse::<UserRole>()
                .map_err(CliError::InvalidArguments)?;
            let user = service
                .create(CreateUserRequest { name, email, role })
                .await?;
            println!("✅ Created user #{} '{}'", user.id, user.name);
            Ok(())
        }
        UserCommands::Update {
            id,
            name,
            email,
            role,
            active,
        } => {
            let role = role
                .map(|value| value.parse::<UserRole>())
                .transpose()
                .map_err(CliError::InvalidArguments)?;
            let user = service
                .update(
                    id,
                    UpdateUserRequest {
                        name,
                        email,
                        role,
                        active,
                    },
                )
                .await?;
            println!("✅ Updated user #{} '{}'", user.id, user.name);
            Ok(())
        }
        UserCommands::Delete { id, yes } => {
            if !confirm(&format!("Delete user {}?", id), yes)? {
                println!("Aborted.");
                return Ok(());
            }
            service.delete(id).await?;
            println!("✅ Deleted user #{}", id);
            Ok(())
        }
    }
}

// === Lead groups ===

fn lead_group_columns() -> Vec<ColumnDef<LeadGroup>> {
    vec![
        ColumnDef::new("id", "ID", |group: &LeadGroup| group.id.to_string()),
        ColumnDef::new("name", "Name", |group: &LeadGroup| group.name.clone()),
        ColumnDef::new("lead_count", "Leads", |group: &LeadGroup| {
            group.lead_count.to_string()
        }),
        ColumnDef::new("description", "Description", |group: &LeadGroup| {
            group.description.clone().unwrap_or_default()
        })
        .with_sortable(false),
        ColumnDef::new("updated_at", "Updated", |group: &LeadGroup| {
            format_date(&group.updated_at)
        })
        .with_comparator(|a: &LeadGroup, b: &LeadGroup| a.updated_at.cmp(&b.updated_at)),
    ]
}

fn lead_group_details(group: &LeadGroup) -> Vec<(&'static str, String)> {
    vec![
        ("ID", group.id.to_string()),
        ("Name", group.name.clone()),
        ("Description", group.description.clone().unwrap_or_default()),
        ("Leads", group.lead_count.to_string()),
        ("Created", group.created_at.to_rfc3339()),
        ("Updated", group.updated_at.to_rfc3339()),
    ]
}

pub async fn handle_lead_groups(
    command: LeadGroupCommands,
    client: OrgClient,
    context: &ListContext,
) -> Result<(), AppError> {
    let service = ResourceService::<LeadGroup>::new(client);
    match command {
        LeadGroupCommands::List { args } => {
            let mut noop = |_: &LeadGroup| None;
            run_list(&service, lead_group_columns(), args, context, &mut noop).await
        }
        LeadGroupCommands::Get { id } => {
            let group = service.get(id).await?;
            println!(
                "{}",
                TableRenderer::new().render_details(&lead_group_details(&group))
            );
            Ok(())
        }
        LeadGroupCommands::Create { name, description } => {
            let group = service
                .create(CreateLeadGroupRequest { name, description })
                .await?;
            println!("✅ Created lead group #{} '{}'", group.id, group.name);
            Ok(())
        }
        LeadGroupCommands::Update {
            id,
            name,
            description,
        } => {
            let group = service
                .update(id, UpdateLeadGroupRequest { name, description })
                .await?;
            println!("✅ Updated lead group #{} '{}'", group.id, group.name);
            Ok(())
        }
        LeadGroupCommands::Delete { id, yes } => {
            if !confirm(&format!("Delete lead group {}?", id), yes)? {
                println!("Aborted.");
                return Ok(());
            }
            service.delete(id).await?;
            println!("✅ Deleted lead group #{}", id);
            Ok(())
        }
    }
}

// === Voice assets ===

fn voice_columns() -> Vec<ColumnDef<VoiceAsset>> {
    vec![
        ColumnDef::new("id", "ID", |asset: &VoiceAsset| asset.id.to_string()),
        ColumnDef::new("name", "Name", |asset: &VoiceAsset| asset.name.clone()),
        ColumnDef::new("file_name", "File", |asset: &VoiceAsset| {
            asset.file_name.clone()
        }),
        ColumnDef::new("duration_secs", "Duration", |asset: &VoiceAsset| {
            asset
                .duration_secs
                .map(|secs| format!("{:.1}s", secs))
                .unwrap_or_default()
        }),
        ColumnDef::new("created_at", "Created", |asset: &VoiceAsset| {
            format_date(&asset.created_at)
        })
        .with_comparator(|a: &VoiceAsset, b: &VoiceAsset| a.created_at.cmp(&b.created_at)),
    ]
}

fn voice_details(asset: &VoiceAsset) -> Vec<(&'static str, String)> {
    vec![
        ("ID", asset.id.to_string()),
        ("Name", asset.name.clone()),
        ("File", asset.file_name.clone()),
        (
            "Content type",
            asset.content_type.clone().unwrap_or_default(),
        ),
        (
            "Duration",
            asset
                .duration_secs
                .map(|secs| format!("{:.1}s", secs))
                .unwrap_or_default(),
        ),
        ("URL", asset.url.clone()),
        ("Created", asset.created_at.to_rfc3339()),
    ]
}

pub async fn handle_voices(
    command: VoiceCommands,
    client: OrgClient,
    context: &ListContext,
) -> Result<(), AppError> {
    let service = ResourceService::<VoiceAsset>::new(client);
    match command {
        VoiceCommands::List { args } => {
            // One preview at a time: activating a row claims the slot,
            // activating it again (or another row) releases the previous one.
            let mut coordinator = PreviewCoordinator::new();
            let mut activate = move |asset: &VoiceAsset| {
                if coordinator.is_active(asset.id) {
                    coordinator.release(asset.id);
                    Some(format!("⏹ Stopped preview of '{}'", asset.name))
                } else {
                    match coordinator.claim(asset.id) {
                        Some(previous) => Some(format!(
                            "▶ Previewing '{}' (stopped #{})",
                            asset.name, previous
                        )),
                        None => Some(format!("▶ Previewing '{}' ({})", asset.name, asset.url)),
                    }
                }
            };
            run_list(&service, voice_columns(), args, context, &mut activate).await
        }
        VoiceCommands::Get { id } => {
            let asset = service.get(id).await?;
            println!(
                "{}",
                TableRenderer::new().render_details(&voice_details(&asset))
            );
            Ok(())
        }
        VoiceCommands::Create {
            name,
            file_name,
            url,
        } => {
            crate::utils::validation::validate_url(&url)?;
            let asset = service
                .create(CreateVoiceAssetRequest {
                    name,
                    file_name,
                    url,
                })
                .await?;
            println!("✅ Registered voice asset #{} '{}'", asset.id, asset.name);
            Ok(())
        }
        VoiceCommands::Update { id, name } => {
            let asset = service
                .update(id, UpdateVoiceAssetRequest { name: Some(name) })
                .await?;
            println!("✅ Updated voice asset #{} '{}'", asset.id, asset.name);
            Ok(())
        }
        VoiceCommands::Delete { id, yes } => {
            if !confirm(&format!("Delete voice asset {}?", id), yes)? {
                println!("Aborted.");
                return Ok(());
            }
            service.delete(id).await?;
            println!("✅ Deleted voice asset #{}", id);
            Ok(())
        }
        VoiceCommands::Preview { id } => {
            let asset = service.get(id).await?;
            let mut coordinator = PreviewCoordinator::new();
            coordinator.claim(asset.id);
            println!("▶ Previewing '{}' ({})", asset.name, asset.url);
            if let Some(duration) = asset.duration_secs {
                println!(
                    "   {:.1}s, {}",
                    duration,
                    asset.content_type.as_deref().unwrap_or("audio")
                );
            }
            coordinator.release(asset.id);
            Ok(())
        }
    }
}

// === Overview ===

fn envelope_total<T>(envelope: &ListEnvelope<T>) -> String {
    envelope
        .meta
        .map(|meta| meta.total)
        .unwrap_or(envelope.data.len())
        .to_string()
}

/// Record totals across the five resources, fetched concurrently.
pub async fn handle_overview(client: OrgClient, verbose: bool) -> Result<(), AppError> {
    print_verbose(verbose, "Fetching record totals across resources");

    let agents = ResourceService::<Agent>::new(client.clone());
    let routines = ResourceService::<Routine>::new(client.clone());
    let users = ResourceService::<User>::new(client.clone());
    let lead_groups = ResourceService::<LeadGroup>::new(client.clone());
    let voices = ResourceService::<VoiceAsset>::new(client);

    let head = || ListParams::for_page(1, 1);
    let (agents_env, routines_env, users_env, groups_env, voices_env) = futures::try_join!(
        agents.list(head()),
        routines.list(head()),
        users.list(head()),
        lead_groups.list(head()),
        voices.list(head()),
    )?;

    let renderer = TableRenderer::new();
    println!(
        "{}",
        renderer.render_details(&[
            ("Agents", envelope_total(&agents_env)),
            ("Routines", envelope_total(&routines_env)),
            ("Users", envelope_total(&users_env)),
            ("Lead groups", envelope_total(&groups_env)),
            ("Voice assets", envelope_total(&voices_env)),
        ])
    );
    Ok(())
}
