//! User account commands.

use anyhow::{bail, Result};

use libreria_core::NewUser;
use libreria_db::Database;

use crate::output;

pub async fn agregar(db: &Database, nombre: &str, email: &str) -> Result<()> {
    let user = db
        .users()
        .insert(&NewUser {
            name: nombre.to_string(),
            email: email.to_string(),
        })
        .await?;
    println!("added user #{}: {} <{}>", user.id, user.name, user.email);
    Ok(())
}

pub async fn listar(db: &Database) -> Result<()> {
    let users = db.users().list().await?;
    output::print_users(&users);
    Ok(())
}

pub async fn eliminar(db: &Database, id: i64) -> Result<()> {
    if db.users().delete(id).await? {
        println!("deleted user #{id} (their sales remain, unowned)");
        Ok(())
    } else {
        bail!("user #{id} not found");
    }
}
