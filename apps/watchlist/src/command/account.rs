use tracing::info;

use crate::{Data, Error};

pub async fn login(data: &Data, email: &str, password: &str) -> Result<(), Error> {
    data.session.login(email, password).await?;
    info!("login: ok");
    println!("Logged in as {email}.");
    Ok(())
}

pub async fn signup(data: &Data, email: &str, password: &str) -> Result<(), Error> {
    data.session.signup(email, password).await?;
    info!("signup: ok");
    println!("Account created for {email}.");
    Ok(())
}

pub fn logout(data: &Data) -> Result<(), Error> {
    data.session.logout()?;
    println!("Logged out.");
    Ok(())
}

pub async fn password(data: &Data, new_password: &str) -> Result<(), Error> {
    let message = data.session.update_password(new_password).await?;
    println!("{message}");
    Ok(())
}
