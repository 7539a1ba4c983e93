use lettre_mandrill::{manager, Config, MailManager, Message};

fn main() {
    tracing_subscriber::fmt::init();

    let email = Message::builder()
        .from("NoBody <nobody@domain.tld>".parse().unwrap())
        .reply_to("Yuin <yuin@domain.tld>".parse().unwrap())
        .to("Hei <hei@domain.tld>".parse().unwrap())
        .subject("Happy new year")
        .html("<p>Be happy!</p>")
        .text("Be happy!")
        .build()
        .unwrap();

    // MANDRILL_SECRET and MAIL_FROM_ADDRESS override the file
    let config = Config::load("config/mandrill.toml").unwrap();
    let mut manager = MailManager::new(config);
    manager::mandrill::register(&mut manager);

    manager
        .events()
        .on_sent(|event| println!("Mandrill answered: {}", event.response));

    let mailer = manager.default_mailer().unwrap();
    match mailer.deliver(&email) {
        Ok(()) => println!("Email sent successfully!"),
        Err(e) => panic!("Could not send email: {e:?}"),
    }
}
