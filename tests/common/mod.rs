//! Minimal section reader used by the integration tests in place of the real
//! lexer and parser.

#![allow(dead_code)]

use std::sync::Arc;
use xcl::{
    primitives, write_tokens, ClassType, Instance, LexKind, ParsedSection, Result, Symbol, Token,
    TokenKind,
};

fn lex(text: &str) -> Vec<(LexKind, String, String)> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let start = i;
        match c {
            '\n' => {
                i += 1;
                out.push((LexKind::NewLine, "\n".to_string(), "\n".to_string()));
            }
            ' ' | '\t' | '\r' => {
                while i < chars.len() && matches!(chars[i], ' ' | '\t' | '\r') {
                    i += 1;
                }
                let s: String = chars[start..i].iter().collect();
                out.push((LexKind::Space, s.clone(), s));
            }
            '#' => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
                let s: String = chars[start..i].iter().collect();
                out.push((LexKind::Comment, s.clone(), s));
            }
            ':' | '{' | '}' | '=' => {
                i += 1;
                out.push((LexKind::Operator, c.to_string(), c.to_string()));
            }
            '"' => {
                i += 1;
                let mut name = String::new();
                while i < chars.len() && chars[i] != '"' {
                    if chars[i] == '\\' && i + 1 < chars.len() {
                        i += 1;
                        name.push(match chars[i] {
                            'n' => '\n',
                            'r' => '\r',
                            't' => '\t',
                            other => other,
                        });
                    } else {
                        name.push(chars[i]);
                    }
                    i += 1;
                }
                i += 1;
                let raw: String = chars[start..i.min(chars.len())].iter().collect();
                out.push((LexKind::String, raw, name));
            }
            _ => {
                while i < chars.len()
                    && !matches!(chars[i], ' ' | '\t' | '\r' | '\n' | ':' | '{' | '}' | '=' | '"' | '#')
                {
                    i += 1;
                }
                let s: String = chars[start..i].iter().collect();
                out.push((LexKind::Identifier, s.clone(), s));
            }
        }
    }
    out
}

#[derive(Clone, Copy, PartialEq)]
enum State {
    Outside,
    Header,
    Parameter,
    FieldName,
    SetOperator,
    Value,
}

/// A parsed file: instances in order plus tokens after the last section.
pub struct Document {
    pub instances: Vec<Instance>,
    pub trailing: Vec<Token>,
}

impl Document {
    pub fn parse(text: &str, classes: &[Arc<ClassType>]) -> Result<Self> {
        let mut instances = Vec::new();
        let mut pending: Vec<Token> = Vec::new();
        let mut section = ParsedSection::default();
        let mut class: Option<Arc<ClassType>> = None;
        let mut field_name = String::new();
        let mut state = State::Outside;

        for (lex, raw, name) in lex(text) {
            let trivia = matches!(lex, LexKind::Space | LexKind::NewLine | LexKind::Comment);
            if trivia {
                let token = Token::new(lex, TokenKind::Meaningless, raw);
                if state == State::Outside {
                    pending.push(token);
                } else {
                    section.tokens.push(token);
                }
                continue;
            }

            let token = match state {
                State::Outside => {
                    class = classes.iter().find(|c| c.name() == raw).cloned();
                    section.pre_tokens = std::mem::take(&mut pending);
                    state = State::Header;
                    Token::new(lex, TokenKind::TypeName, raw)
                }
                State::Header if raw == ":" => {
                    state = State::Parameter;
                    Token::new(lex, TokenKind::ParameterStart, raw)
                }
                State::Header => {
                    state = State::FieldName;
                    Token::new(lex, TokenKind::SectionStart, raw)
                }
                State::Parameter => {
                    let symbol = Symbol::with_name(name, Token::new(lex, TokenKind::Value, raw));
                    section.parameter = Some(primitives::string().symbol_to_value(&symbol)?);
                    state = State::Header;
                    symbol.into_token()
                }
                State::FieldName if raw == "}" => {
                    section
                        .tokens
                        .push(Token::new(lex, TokenKind::SectionEnd, raw));
                    let class = class.take().expect("section for an unknown class");
                    instances.push(Instance::from_parsed(class, std::mem::take(&mut section))?);
                    state = State::Outside;
                    continue;
                }
                State::FieldName => {
                    field_name = raw.clone();
                    state = State::SetOperator;
                    Token::new(lex, TokenKind::FieldName, raw)
                }
                State::SetOperator => {
                    state = State::Value;
                    Token::new(lex, TokenKind::SetOperator, raw)
                }
                State::Value => {
                    let symbol = Symbol::with_name(name, Token::new(lex, TokenKind::Value, raw));
                    section
                        .fields
                        .push((std::mem::take(&mut field_name), symbol.clone()));
                    state = State::FieldName;
                    symbol.into_token()
                }
            };
            section.tokens.push(token);
        }

        Ok(Document {
            instances,
            trailing: pending,
        })
    }

    pub fn write(&mut self) -> String {
        let mut text = String::new();
        for instance in &mut self.instances {
            text.push_str(&instance.to_text());
        }
        text.push_str(&write_tokens(&self.trailing));
        text
    }
}

pub fn server_class() -> Arc<ClassType> {
    Arc::new(
        xcl::xcl_class!("Server" => {
            "Port": primitives::integer(),
            "Debug": primitives::boolean(),
        })
        .unwrap(),
    )
}

pub fn logging_class() -> Arc<ClassType> {
    Arc::new(
        xcl::xcl_class!("Logging" => {
            "Level": primitives::EnumType::new("Level", ["Debug", "Info", "Warn", "Error"])?.into_type(),
            "Path": primitives::string(),
            "Ratio": primitives::float(),
            "Since": primitives::datetime(),
        })
        .unwrap(),
    )
}
