#[cfg(test)]
pub mod test {
    use crate::Cascade;

    #[derive(Cascade, Default, Debug, PartialEq)]
    pub struct ServerConfig {
        /// API token.
        #[cascade(
            toml = "token",
            yaml = "token",
            json = "token",
            ini = "token",
            env = "TOKEN",
            cli = "t,token",
            default = "default_token"
        )]
        pub token: String,

        /// Listener settings.
        #[cascade(toml = "server", yaml = "server", json = "server", ini = "server")]
        pub server: Server,

        /// Enable chatty output.
        #[cascade(toml = "verbose", ini = "verbose", env = "VERBOSE", cli = "v,verbose")]
        pub verbose: bool,

        /// Never touched by any source.
        #[cascade(skip)]
        pub internal: String,
    }

    #[derive(Cascade, Default, Debug, PartialEq)]
    pub struct Server {
        #[cascade(
            toml = "host",
            yaml = "host",
            json = "host",
            ini = "host",
            env = "HOST",
            cli = "h,host",
            default = "localhost"
        )]
        pub host: String,

        #[cascade(
            toml = "port",
            yaml = "port",
            json = "port",
            ini = "port",
            env = "PORT",
            cli = "p,port",
            default = 9000
        )]
        pub port: u16,
    }

    // -- Fixture for deep nesting and optional shapes ---------------------------

    #[derive(Cascade, Default, Debug, PartialEq)]
    pub struct Deep {
        #[cascade(env = "NAME", cli = "n,name", default = "anon")]
        pub name: Option<String>,

        #[cascade(env = "TAGS", cli = "tag")]
        pub tags: Vec<String>,

        #[cascade(toml = "outer", json = "outer")]
        pub outer: Option<Outer>,
    }

    #[derive(Cascade, Default, Debug, PartialEq)]
    pub struct Outer {
        #[cascade(toml = "middle", json = "middle")]
        pub middle: Middle,
    }

    #[derive(Cascade, Default, Debug, PartialEq)]
    pub struct Middle {
        #[cascade(toml = "inner", json = "inner")]
        pub inner: Inner,
    }

    #[derive(Cascade, Default, Debug, PartialEq)]
    pub struct Inner {
        #[cascade(toml = "level", json = "level", env = "LEVEL", cli = "level", default = 3)]
        pub level: i32,
    }

    // -- Fixture for numeric coercion -------------------------------------------

    #[derive(Cascade, Default, Debug, PartialEq)]
    pub struct Numbers {
        #[cascade(ini = "count", env = "COUNT", cli = "c,count", default = 7)]
        pub count: u32,

        #[cascade(ini = "offset", env = "OFFSET", cli = "offset")]
        pub offset: i64,

        #[cascade(ini = "ratio", env = "RATIO", cli = "r,ratio", default = 0.5)]
        pub ratio: f64,

        #[cascade(env = "LIMIT", cli = "limit")]
        pub limit: Option<u64>,

        #[cascade(env = "DEBUG", cli = "d,debug")]
        pub debug: Option<bool>,
    }
}
