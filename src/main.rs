use clap::Parser;
use hr_admin::app::input::{remove_rows, ContractsDocument, EditDocument, UserDocument};
use hr_admin::app::pages::{CreateUserPage, EditUserPage, Flash, UserListPage};
use hr_admin::app::render::{render_contract_summary, render_contracts, render_user_detail};
use hr_admin::config::cli::{Command, ContractEditArgs, ContractsCommand, UsersCommand};
use hr_admin::core::contract_editor::{ContractEditor, LineItemField};
use hr_admin::core::contract_store::ContractStore;
use hr_admin::core::currency::format_rupiah;
use hr_admin::utils::error::{ErrorSeverity, HrError, Result};
use hr_admin::utils::logger;
use hr_admin::{AppConfig, CliConfig, HttpApiClient};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let app_config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(3);
        }
    };

    // 初始化日誌
    logger::init_cli_logger(
        cli.verbose || app_config.verbose(),
        cli.json_logs || app_config.json_logs(),
    );
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli, app_config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        if let HrError::FormValidation(errors) = &e {
            for (field, message) in errors.iter() {
                eprintln!("  {}: {}", field, message);
            }
        } else {
            eprintln!("❌ {}", e.user_friendly_message());
        }
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: CliConfig, app_config: AppConfig) -> Result<()> {
    let settings = app_config.resolve_api(cli.api_base_url.as_deref())?;
    tracing::info!("Using API at {}", settings.base_url);
    let client = HttpApiClient::new(&settings)?;

    match cli.command {
        Command::Users(command) => run_users(command, client).await,
        Command::Contracts(command) => run_contracts(command, client).await,
    }
}

async fn run_users(command: UsersCommand, client: HttpApiClient) -> Result<()> {
    match command {
        UsersCommand::List { format } => {
            let mut page = UserListPage::new(client);
            page.load().await?;
            println!("{}", page.render(format)?);
        }
        UsersCommand::Show { id } => {
            let mut page = EditUserPage::new(id, client.clone(), client);
            page.load().await?;
            if let Some(user) = page.user() {
                println!("{}", render_user_detail(user));
            }
            println!();
            println!("{}", render_contracts(page.editor().kontraks()));
        }
        UsersCommand::Create { file } => {
            let document = UserDocument::from_file(&file)?;
            let mut page = CreateUserPage::new(client.clone());
            document.apply_to(page.form_mut())?;

            let (user, flash) = page.submit().await?;
            tracing::info!("✅ Created user {:?}", user.id);
            show_list_with_flash(client, flash).await?;
        }
        UsersCommand::Edit { id, file } => {
            let document = EditDocument::from_file(&file)?;
            let mut page = EditUserPage::new(id, client.clone(), client.clone());
            page.load().await?;
            let (form, editor) = page.form_and_editor_mut();
            document.apply_to(form, editor)?;

            match page.submit().await {
                Ok((_, flash)) => show_list_with_flash(client, flash).await?,
                Err(e) => {
                    if let Some(detail) = page.editor().error_message() {
                        if detail != e.to_string() {
                            eprintln!("❌ {}", detail);
                        }
                    }
                    return Err(e);
                }
            }
        }
    }
    Ok(())
}

async fn show_list_with_flash(client: HttpApiClient, flash: Flash) -> Result<()> {
    let mut list = UserListPage::new(client).with_flash(Some(flash));
    match list.load().await {
        Ok(()) => println!("{}", list.render(Default::default())?),
        // 已經儲存成功，列表讀不到只提示
        Err(e) => {
            println!("✅ {}", flash.message());
            tracing::warn!("Could not reload user list: {}", e);
        }
    }
    Ok(())
}

async fn run_contracts(command: ContractsCommand, client: HttpApiClient) -> Result<()> {
    match command {
        ContractsCommand::List => {
            let mut store = ContractStore::new(client);
            store.get_contracts().await;
            if let Some(message) = store.error() {
                return Err(HrError::LoadFailed {
                    resource: "kontrak".to_string(),
                    message: message.to_string(),
                });
            }
            println!("{}", render_contract_summary(store.contract_list()));
        }
        ContractsCommand::Show { user_id } => {
            let mut store = ContractStore::new(client);
            let mut editor = ContractEditor::new(user_id);
            editor.load(&mut store).await;
            if let Some(message) = store.error() {
                return Err(HrError::LoadFailed {
                    resource: format!("kontrak of user {}", user_id),
                    message: message.to_string(),
                });
            }
            println!("{}", render_contracts(editor.kontraks()));
        }
        ContractsCommand::Edit(args) => edit_contracts(args, client).await?,
    }
    Ok(())
}

async fn edit_contracts(args: ContractEditArgs, client: HttpApiClient) -> Result<()> {
    let mut store = ContractStore::new(client);
    let mut editor = ContractEditor::new(args.user_id);
    editor.load(&mut store).await;

    if let Some(file) = &args.file {
        ContractsDocument::from_file(file)?.apply_to(&mut editor)?;
    }

    remove_rows(&mut editor, &args.remove_pendapatan, &args.remove_potongan)?;

    for item in &args.add_pendapatan {
        let i = item.contract - 1;
        let row = editor.add_pendapatan(i)?;
        editor.update_pendapatan(i, row, LineItemField::Nama(item.nama))?;
        editor.update_pendapatan(i, row, LineItemField::Tipe(item.tipe))?;
        editor.update_pendapatan(i, row, LineItemField::Nominal(item.nominal))?;
    }
    for item in &args.add_potongan {
        let i = item.contract - 1;
        let row = editor.add_potongan(i)?;
        editor.update_potongan(i, row, LineItemField::Nama(item.nama))?;
        editor.update_potongan(i, row, LineItemField::Tipe(item.tipe))?;
        editor.update_potongan(i, row, LineItemField::Nominal(item.nominal))?;
    }

    let mut removed_contracts = args.remove_contract.clone();
    removed_contracts.sort_unstable_by(|a, b| b.cmp(a));
    removed_contracts.dedup();
    for c in removed_contracts {
        if c == 0 {
            return Err(HrError::validation("kontraks", "Contract numbers start at 1"));
        }
        editor.remove_contract(c - 1)?;
    }

    println!("{}", render_contracts(editor.kontraks()));

    if args.dry_run {
        for (i, draft) in editor.kontraks().iter().enumerate() {
            tracing::info!(
                "Kontrak #{}: pendapatan {}, potongan {}",
                i + 1,
                format_rupiah(draft.total_pendapatan()),
                format_rupiah(draft.total_potongan())
            );
        }
        println!("\n(dry run, nothing saved)");
        return Ok(());
    }

    if let Err(e) = editor.submit_contracts(&mut store).await {
        if let Some(detail) = editor.error_message() {
            if detail != e.to_string() {
                eprintln!("❌ {}", detail);
            }
        }
        return Err(e);
    }
    println!("\n✅ Kontrak user {} tersimpan", args.user_id);
    Ok(())
}
