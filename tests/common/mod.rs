//! Fixture builder for Java-shaped syntax trees.
//!
//! Tokens are laid out left to right on one line, one column apart, so every
//! node gets a real span. `mark` names the position of the next token.

#![allow(dead_code)]

use std::collections::HashMap;

use jsymtab::ide::ForestManager;
use jsymtab::{FileId, LineCol, Occurrence, SyntaxKind as K, SyntaxTree, TreeBuilder};

pub struct Java {
    builder: TreeBuilder,
    pos: LineCol,
    marks: HashMap<String, LineCol>,
}

/// A finished fixture file.
pub struct Source {
    pub tree: SyntaxTree,
    marks: HashMap<String, LineCol>,
}

/// Marks of a registered file.
pub struct Marks {
    file: FileId,
    marks: HashMap<String, LineCol>,
}

impl Source {
    pub fn register(self, forest: &mut ForestManager) -> Marks {
        let file = forest.add_tree(self.tree);
        Marks {
            file,
            marks: self.marks,
        }
    }
}

impl Marks {
    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn at(&self, name: &str) -> Occurrence {
        let position = self
            .marks
            .get(name)
            .copied()
            .unwrap_or_else(|| panic!("no mark named {name}"));
        Occurrence::new(self.file, position)
    }
}

impl Java {
    /// A compilation unit at `path`.
    pub fn unit(path: &str, body: impl FnOnce(&mut Java)) -> Source {
        let mut j = Java {
            builder: TreeBuilder::new(path),
            pos: LineCol::new(0, 0),
            marks: HashMap::new(),
        };
        j.node(K::CompilationUnit, body);
        Source {
            tree: j.builder.finish().unwrap(),
            marks: j.marks,
        }
    }

    // ===== primitives =====

    pub fn node(&mut self, kind: K, body: impl FnOnce(&mut Java)) -> &mut Self {
        self.builder.start_node(kind, "", self.pos).unwrap();
        body(self);
        self.builder.finish_node().unwrap();
        self
    }

    pub fn token(&mut self, kind: K, text: &str) -> &mut Self {
        self.builder.token(kind, text, self.pos).unwrap();
        self.pos = LineCol::new(self.pos.line, self.pos.col + text.chars().count() as u32 + 1);
        self
    }

    pub fn mark(&mut self, name: &str) -> &mut Self {
        self.marks.insert(name.to_string(), self.pos);
        self
    }

    pub fn ident(&mut self, name: &str) -> &mut Self {
        self.token(K::Ident, name)
    }

    /// `a.b.c` as left-nested `Dot` nodes, or a bare `Ident`.
    pub fn name(&mut self, dotted: &str) -> &mut Self {
        let parts: Vec<&str> = dotted.split('.').collect();
        self.dotted_parts(&parts)
    }

    fn dotted_parts(&mut self, parts: &[&str]) -> &mut Self {
        match parts.split_last() {
            Some((last, [])) => self.ident(last),
            Some((last, init)) => self.node(K::Dot, |j| {
                j.dotted_parts(init);
                j.ident(last);
            }),
            None => self,
        }
    }

    // ===== types =====

    /// A `Type` node: primitives, dotted class names and `[]` suffixes.
    pub fn ty(&mut self, name: &str) -> &mut Self {
        self.node(K::Type, |j| {
            j.type_expr(name);
        })
    }

    fn type_expr(&mut self, name: &str) -> &mut Self {
        if let Some(element) = name.strip_suffix("[]") {
            return self.node(K::ArrayDeclarator, |j| {
                j.type_expr(element);
                j.token(K::RBrack, "]");
            });
        }
        match primitive_keyword(name) {
            Some(kind) => self.token(kind, name),
            None => self.name(name),
        }
    }

    // ===== declarations =====

    pub fn package(&mut self, name: &str) -> &mut Self {
        self.node(K::PackageDef, |j| {
            j.name(name);
            j.token(K::Semi, ";");
        })
    }

    pub fn import(&mut self, name: &str) -> &mut Self {
        self.node(K::Import, |j| {
            match name.strip_suffix(".*") {
                Some(package) => {
                    j.node(K::Dot, |j| {
                        j.name(package);
                        j.token(K::Star, "*");
                    });
                }
                None => {
                    j.name(name);
                }
            }
            j.token(K::Semi, ";");
        })
    }

    pub fn class(&mut self, name: &str, body: impl FnOnce(&mut Java)) -> &mut Self {
        self.class_with(name, None, &[], body)
    }

    pub fn class_with(
        &mut self,
        name: &str,
        extends: Option<&str>,
        implements: &[&str],
        body: impl FnOnce(&mut Java),
    ) -> &mut Self {
        self.node(K::ClassDef, |j| {
            j.node(K::Modifiers, |_| {});
            j.token(K::ClassKw, "class");
            j.mark(name).ident(name);
            if let Some(parent) = extends {
                j.node(K::ExtendsClause, |j| {
                    j.name(parent);
                });
            }
            if !implements.is_empty() {
                j.node(K::ImplementsClause, |j| {
                    for (i, iface) in implements.iter().enumerate() {
                        if i > 0 {
                            j.token(K::Comma, ",");
                        }
                        j.name(iface);
                    }
                });
            }
            j.obj_block(body);
        })
    }

    pub fn interface(&mut self, name: &str, body: impl FnOnce(&mut Java)) -> &mut Self {
        self.node(K::InterfaceDef, |j| {
            j.node(K::Modifiers, |_| {});
            j.token(K::InterfaceKw, "interface");
            j.mark(name).ident(name);
            j.obj_block(body);
        })
    }

    pub fn obj_block(&mut self, body: impl FnOnce(&mut Java)) -> &mut Self {
        self.node(K::ObjBlock, |j| {
            j.token(K::LCurly, "{");
            body(j);
            j.token(K::RCurly, "}");
        })
    }

    /// A method; `params` are `(type, name)` pairs. The name token is marked
    /// with `mark`.
    pub fn method(
        &mut self,
        ret: &str,
        name: &str,
        mark: &str,
        params: &[(&str, &str)],
        body: impl FnOnce(&mut Java),
    ) -> &mut Self {
        self.node(K::MethodDef, |j| {
            j.node(K::Modifiers, |_| {});
            j.ty(ret);
            j.mark(mark).ident(name);
            j.params(params);
            j.block(body);
        })
    }

    pub fn ctor(&mut self, name: &str, mark: &str, params: &[(&str, &str)], body: impl FnOnce(&mut Java)) -> &mut Self {
        self.node(K::CtorDef, |j| {
            j.node(K::Modifiers, |_| {});
            j.mark(mark).ident(name);
            j.params(params);
            j.block(body);
        })
    }

    fn params(&mut self, params: &[(&str, &str)]) -> &mut Self {
        self.token(K::LParen, "(");
        self.node(K::Parameters, |j| {
            for (i, (ty, name)) in params.iter().enumerate() {
                if i > 0 {
                    j.token(K::Comma, ",");
                }
                j.node(K::ParameterDef, |j| {
                    j.node(K::Modifiers, |_| {});
                    j.ty(ty);
                    j.mark(name).ident(name);
                });
            }
        });
        self.token(K::RParen, ")")
    }

    /// A `{ .. }` statement list.
    pub fn block(&mut self, body: impl FnOnce(&mut Java)) -> &mut Self {
        self.node(K::Slist, |j| {
            j.token(K::LCurly, "{");
            body(j);
            j.token(K::RCurly, "}");
        })
    }

    /// A field or local: `ty name;`, the name token marked with `mark`.
    pub fn var(&mut self, ty: &str, name: &str, mark: &str) -> &mut Self {
        self.node(K::VariableDef, |j| {
            j.node(K::Modifiers, |_| {});
            j.ty(ty);
            j.mark(mark).ident(name);
            j.token(K::Semi, ";");
        })
    }

    /// `ty name = init;`
    pub fn var_init(&mut self, ty: &str, name: &str, mark: &str, init: impl FnOnce(&mut Java)) -> &mut Self {
        self.node(K::VariableDef, |j| {
            j.node(K::Modifiers, |_| {});
            j.ty(ty);
            j.mark(mark).ident(name);
            j.node(K::Assign, |j| {
                j.node(K::Expr, init);
            });
            j.token(K::Semi, ";");
        })
    }

    // ===== statements =====

    /// `expr;`
    pub fn stmt(&mut self, expr: impl FnOnce(&mut Java)) -> &mut Self {
        self.node(K::Expr, expr);
        self.token(K::Semi, ";")
    }

    pub fn ret(&mut self, expr: impl FnOnce(&mut Java)) -> &mut Self {
        self.node(K::Return, |j| {
            j.node(K::Expr, expr);
            j.token(K::Semi, ";");
        })
    }

    /// `if (cond) then else otherwise`
    pub fn if_else(
        &mut self,
        cond: impl FnOnce(&mut Java),
        then: impl FnOnce(&mut Java),
        otherwise: Option<Box<dyn FnOnce(&mut Java) + '_>>,
    ) -> &mut Self {
        self.node(K::If, |j| {
            j.token(K::IfKw, "if");
            j.token(K::LParen, "(");
            j.node(K::Expr, cond);
            j.token(K::RParen, ")");
            j.block(then);
            if let Some(otherwise) = otherwise {
                j.node(K::Else, |j| {
                    j.block(otherwise);
                });
            }
        })
    }

    /// `label: body`
    pub fn labeled(&mut self, label: &str, mark: &str, body: impl FnOnce(&mut Java)) -> &mut Self {
        self.node(K::Labeled, |j| {
            j.mark(mark).ident(label);
            j.token(K::Colon, ":");
            body(j);
        })
    }

    /// `break label;`
    pub fn break_to(&mut self, label: &str, mark: &str) -> &mut Self {
        self.node(K::Break, |j| {
            j.mark(mark).ident(label);
            j.token(K::Semi, ";");
        })
    }

    // ===== expressions =====

    /// `callee(args)`; `callee` may be dotted. The last callee segment is
    /// marked with `mark`.
    pub fn call(&mut self, callee: &str, mark: &str, args: impl FnOnce(&mut Java)) -> &mut Self {
        self.node(K::MethodCall, |j| {
            match callee.rsplit_once('.') {
                Some((qualifier, name)) => {
                    j.node(K::Dot, |j| {
                        j.name(qualifier);
                        j.mark(mark).ident(name);
                    });
                }
                None => {
                    j.mark(mark).ident(callee);
                }
            }
            j.token(K::LParen, "(");
            j.node(K::Elist, args);
            j.token(K::RParen, ")");
        })
    }

    /// `new T(args)`, the type name marked with `mark`.
    pub fn new_object(&mut self, ty: &str, mark: &str, args: impl FnOnce(&mut Java)) -> &mut Self {
        self.node(K::New, |j| {
            j.mark(mark).name(ty);
            j.token(K::LParen, "(");
            j.node(K::Elist, args);
            j.token(K::RParen, ")");
        })
    }

    /// `new T() { body }`
    pub fn new_anonymous(&mut self, ty: &str, mark: &str, body: impl FnOnce(&mut Java)) -> &mut Self {
        self.node(K::New, |j| {
            j.mark(mark).name(ty);
            j.token(K::LParen, "(");
            j.node(K::Elist, |_| {});
            j.token(K::RParen, ")");
            j.obj_block(body);
        })
    }

    /// `lhs = rhs`
    pub fn assign(&mut self, lhs: impl FnOnce(&mut Java), rhs: impl FnOnce(&mut Java)) -> &mut Self {
        self.node(K::Assign, |j| {
            lhs(j);
            rhs(j);
        })
    }

    pub fn binary(&mut self, op: K, lhs: impl FnOnce(&mut Java), rhs: impl FnOnce(&mut Java)) -> &mut Self {
        self.node(op, |j| {
            lhs(j);
            rhs(j);
        })
    }

    pub fn int(&mut self, text: &str) -> &mut Self {
        self.token(K::NumInt, text)
    }

    pub fn long(&mut self, text: &str) -> &mut Self {
        self.token(K::NumLong, text)
    }

    pub fn string(&mut self, text: &str) -> &mut Self {
        self.token(K::StringLiteral, &format!("\"{text}\""))
    }

    pub fn null(&mut self) -> &mut Self {
        self.token(K::Null, "null")
    }

    pub fn this(&mut self) -> &mut Self {
        self.token(K::This, "this")
    }
}

fn primitive_keyword(name: &str) -> Option<K> {
    Some(match name {
        "void" => K::VoidKw,
        "boolean" => K::BooleanKw,
        "byte" => K::ByteKw,
        "char" => K::CharKw,
        "short" => K::ShortKw,
        "int" => K::IntKw,
        "long" => K::LongKw,
        "float" => K::FloatKw,
        "double" => K::DoubleKw,
        _ => return None,
    })
}
