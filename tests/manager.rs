use std::{
    io::{BufRead, BufReader, Read, Write},
    net::TcpListener,
    sync::{Arc, Mutex},
    thread,
};

use lettre_mandrill::{manager, Config, Error, MailManager, Message};

fn config(url: String) -> Config {
    let mut config = Config::default();
    config.mandrill.url = url;
    config.services.mandrill.secret = Some("md-manager".to_owned());
    config.mail.from_address = Some("noreply@example.org".to_owned());
    config.mail.from_name = Some("Manager".to_owned());
    config
}

fn message() -> Message {
    Message::builder()
        .from("a@x.com".parse().unwrap())
        .to("b@x.com".parse().unwrap())
        .subject("Hello")
        .build()
        .unwrap()
}

#[test]
fn default_mailer_sends_through_mandrill() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/api/1.0/", listener.local_addr().unwrap());

    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(&mut stream);
        let mut request = String::new();
        let mut length = 0;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some((key, value)) = line.split_once(':') {
                if key.eq_ignore_ascii_case("content-length") {
                    length = value.trim().parse().unwrap();
                }
            }
            request.push_str(&line);
            if line == "\r\n" {
                break;
            }
        }
        let mut body = vec![0; length];
        reader.read_exact(&mut body).unwrap();
        request.push_str(std::str::from_utf8(&body).unwrap());
        drop(reader);

        let body = r#"[{"email":"b@x.com","status":"sent"}]"#;
        write!(
            stream,
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();

        request
    });

    let mut manager = MailManager::new(config(url));
    manager::mandrill::register(&mut manager);

    let keys = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&keys);
    manager.events().on_sent(move |event| {
        seen.lock()
            .unwrap()
            .push((event.request.key.clone(), event.request.message.from_name.clone()));
    });

    let mailer = manager.default_mailer().unwrap();
    assert_eq!(mailer.name(), "mandrill");
    mailer.deliver(&message()).unwrap();

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /api/1.0/messages/send.json "));
    assert!(request.contains(r#""from_email":"noreply@example.org""#));

    assert_eq!(
        *keys.lock().unwrap(),
        [("md-manager".to_owned(), "Manager".to_owned())]
    );
}

#[test]
fn unregistered_default_mailer() {
    let manager = MailManager::new(Config::default());
    match manager.default_mailer() {
        Err(Error::UnknownTransport(name)) => assert_eq!(name, "mandrill"),
        Err(err) => panic!("unexpected error: {err}"),
        Ok(_) => panic!("mandrill is not registered"),
    }
}

#[test]
fn unreachable_mandrill_reports_error() {
    let url = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let mut manager = MailManager::new(config(url));
    manager::mandrill::register(&mut manager);

    let errors = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&errors);
    manager
        .events()
        .on_error(move |event| seen.lock().unwrap().push(event.error.to_owned()));

    let err = manager
        .mailer("mandrill")
        .unwrap()
        .deliver(&message())
        .unwrap_err();

    assert_eq!(*errors.lock().unwrap(), [err.to_string()]);
}
