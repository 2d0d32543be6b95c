//! Registration Flow Demo
//!
//! Run with: `cargo run --example registration_flow`
//!
//! Signs up an owner, registers dogs up to the cap, edits and deletes one,
//! then signs out.

use agility_compe::app::{Action, App, NewDog, View};
use agility_compe::auth::MemoryAuthService;
use agility_compe::config::Config;
use agility_compe::registry::{DogClass, DogFields, Event, MemoryRecordStore};
use agility_compe::session::SessionId;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("=== Registration Flow Demo ===\n");

    let config = Config::from_env()?;
    match &config.backend {
        Some(backend) => println!("Backend configured at {} (demo uses in-memory)", backend.url),
        None => println!("No backend configured, using in-memory collaborators"),
    }
    let app = App::new(config, MemoryAuthService::new(), MemoryRecordStore::new());
    let session = SessionId::new("demo-browser");

    show(
        "Visit registration page signed out",
        &app.handle(&session, Action::Visit(agility_compe::app::Page::DogInfo))
            .await,
    );

    show(
        "Sign up",
        &app.handle(
            &session,
            Action::SignUp {
                name: "山田 花子".to_string(),
                email: "hanako@example.com".to_string(),
                password: "agility".to_string(),
            },
        )
        .await,
    );

    show(
        "Sign up again with the same email",
        &app.handle(
            &SessionId::new("other-browser"),
            Action::SignUp {
                name: "別人".to_string(),
                email: "hanako@example.com".to_string(),
                password: "agility2".to_string(),
            },
        )
        .await,
    );

    let mut last = None;
    for name in ["フェリーチェ", "カーロ", "ディーノ", "ルーチェ", "ステラ"] {
        let view = app
            .handle(
                &session,
                Action::AddDog(NewDog {
                    dog_name: name.to_string(),
                    breed: "ボーダーコリー".to_string(),
                    dog_class: DogClass::M,
                    events: vec![Event::Ag1, Event::Jp15],
                }),
            )
            .await;
        show(&format!("Add {name}"), &view);
        last = Some(view);
    }

    if let Some(View::DogInfo(info)) = last {
        if let Some(first) = info.dogs.first() {
            let id = first.id().to_string();
            show(
                "Update first dog",
                &app.handle(
                    &session,
                    Action::UpdateDog {
                        id: id.clone(),
                        fields: DogFields {
                            breed: "シェルティ".to_string(),
                            dog_class: DogClass::S,
                            events: vec![Event::Ag2],
                        },
                    },
                )
                .await,
            );
            show(
                "Delete first dog",
                &app.handle(&session, Action::DeleteDog { id, confirmed: true })
                    .await,
            );
        }
    }

    show("Sign out", &app.handle(&session, Action::SignOut).await);
    Ok(())
}

fn show(step: &str, view: &View) {
    println!("-- {step} -> {:?}", view.page());
    if let Some(flash) = view.flash() {
        println!("   flash: {flash}");
    }
    if let Some(error) = view.error() {
        println!("   error: {error}");
    }
    if let View::DogInfo(info) = view {
        println!("   {}", info.summary);
        for dog in &info.dogs {
            let events: Vec<_> = dog.events().iter().map(ToString::to_string).collect();
            println!(
                "   - {} [{}] {} / {}",
                dog.dog_name(),
                dog.dog_class(),
                dog.breed(),
                events.join(", ")
            );
        }
    }
}
