//! Sample passages offered when a built-in category is picked without content.

pub const CUSTOM_CATEGORY: &str = "Custom";

pub const SAMPLE_CONTENT: &[(&str, &str)] = &[
    (
        "Java",
        "Java is an object oriented programming language. \
         It runs on the Java Virtual Machine (JVM). \
         Classes and objects are core concepts in Java. \
         Inheritance and polymorphism are supported features. \
         The Java Standard Library provides collections and IO utilities. \
         Java uses garbage collection for memory management. \
         Exception handling is done with try-catch blocks.",
    ),
    (
        "AI",
        "Artificial Intelligence is the simulation of human intelligence in machines. \
         Machine learning is a subset of AI that learns from data. \
         Neural networks are used for deep learning applications. \
         AI can be applied in computer vision and language tasks. \
         Training data quality significantly affects model performance. \
         Natural language processing helps machines understand text. \
         Supervised learning uses labeled training data.",
    ),
    (
        "Networking",
        "Computer networking connects multiple computers together. \
         The TCP protocol provides reliable communication channels. \
         IP addressing uniquely identifies hosts on networks. \
         Routers forward packets between different networks. \
         The OSI model has seven distinct layers. \
         DNS translates domain names to IP addresses. \
         HTTP is the protocol used for web communication.",
    ),
];
